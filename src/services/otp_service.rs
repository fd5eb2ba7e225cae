use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use thiserror::Error;

use crate::{
    db::OrmConn,
    entity::email_otps::{ActiveModel as OtpActive, Column as OtpCol, Entity as EmailOtps},
    error::AppError,
    middleware::auth::Role,
    state::AppState,
};

pub const OTP_TTL_MINUTES: i64 = 10;

#[derive(Debug, Error)]
pub enum OtpError {
    /// No unused row matches (email, code, role).
    #[error("OTP not found")]
    NotFound,
    /// A matching row exists but its window has passed. The row is left
    /// unused; it simply becomes unmatchable.
    #[error("OTP expired")]
    Expired,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::NotFound | OtpError::Expired => {
                AppError::BadRequest("Invalid or expired OTP".to_string())
            }
            OtpError::Db(e) => AppError::OrmError(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OtpIssue {
    pub code: String,
    pub email_sent: bool,
}

/// Uniformly random 6-digit decimal code, leading zeros preserved.
pub fn generate_code(rng: &mut impl Rng) -> String {
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// Issue a fresh code for (email, role): supersede every prior code, persist
/// the new one with a 10-minute window, then attempt delivery. Delivery
/// failure does not fail issuance; the caller surfaces the code instead.
pub async fn issue(state: &AppState, email: &str, role: Role) -> Result<OtpIssue, AppError> {
    let code = generate_code(&mut rand::thread_rng());

    EmailOtps::update_many()
        .col_expr(OtpCol::Used, Expr::value(true))
        .filter(OtpCol::Email.eq(email))
        .filter(OtpCol::UserType.eq(role.as_str()))
        .filter(OtpCol::Used.eq(false))
        .exec(&state.orm)
        .await?;

    let now = Utc::now();
    let saved = OtpActive {
        id: NotSet,
        email: Set(email.to_string()),
        otp: Set(code.clone()),
        user_type: Set(role.as_str().to_string()),
        created_at: Set(now.fixed_offset()),
        expires_at: Set((now + Duration::minutes(OTP_TTL_MINUTES)).fixed_offset()),
        used: Set(false),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(email, role = role.as_str(), otp_id = saved.id, "OTP issued");

    let body = format!(
        "Hello,\n\nYour OTP for {} email verification is: {}\n\n\
         This OTP will expire in {} minutes.\n\n\
         If you didn't request this, please ignore this email.\n\n\
         Best regards,\nBazaar Team",
        role.as_str(),
        code,
        OTP_TTL_MINUTES,
    );

    let email_sent = match state
        .mailer
        .send(email, "Email Verification OTP", &body)
        .await
    {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                email,
                role = role.as_str(),
                error = %err,
                "OTP email delivery failed; code stays valid, use resend-otp"
            );
            false
        }
    };

    Ok(OtpIssue { code, email_sent })
}

/// Consume a code. Succeeds at most once per issued code.
pub async fn verify(orm: &OrmConn, email: &str, code: &str, role: Role) -> Result<(), OtpError> {
    let row = EmailOtps::find()
        .filter(OtpCol::Email.eq(email))
        .filter(OtpCol::Otp.eq(code))
        .filter(OtpCol::UserType.eq(role.as_str()))
        .filter(OtpCol::Used.eq(false))
        .one(orm)
        .await?;

    let Some(row) = row else {
        tracing::warn!(email, "invalid OTP");
        return Err(OtpError::NotFound);
    };

    if row.expires_at.with_timezone(&Utc) < Utc::now() {
        tracing::warn!(email, "expired OTP");
        return Err(OtpError::Expired);
    }

    let mut active: OtpActive = row.into();
    active.used = Set(true);
    active.update(orm).await?;

    tracing::info!(email, "OTP verified");
    Ok(())
}

/// Housekeeping: drop rows past their window so the table stays bounded.
/// Correctness does not depend on this; the used flag and the expiry check
/// in `verify` already carry it.
pub async fn sweep_expired(orm: &OrmConn) -> Result<u64, sea_orm::DbErr> {
    let result = EmailOtps::delete_many()
        .filter(OtpCol::ExpiresAt.lt(Utc::now().fixed_offset()))
        .exec(orm)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn codes_are_six_decimal_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), 6, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_digit()), "{code}");
        }
    }

    #[test]
    fn leading_zeros_are_preserved() {
        // Scan seeds until the raw value is small enough to need padding.
        let mut found = false;
        for seed in 0..5000u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let code = generate_code(&mut rng);
            if code.starts_with('0') {
                found = true;
                assert_eq!(code.len(), 6);
                break;
            }
        }
        assert!(found, "no padded code in 5000 seeds");
    }
}
