mod common;

use chrono::{Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use bazaar_api::{
    entity::email_otps::{ActiveModel as OtpActive, Column as OtpCol, Entity as EmailOtps},
    middleware::auth::Role,
    services::otp_service::{self, OtpError},
};
use common::{setup_state, unique};

// A code verifies exactly once; the second attempt no longer matches.
#[tokio::test]
async fn otp_round_trip_consumes_the_code() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, mailer) = setup_state(&url).await?;
    let email = format!("{}@example.com", unique("otp-roundtrip"));

    let issued = otp_service::issue(&state, &email, Role::User).await?;
    assert!(issued.email_sent);
    assert_eq!(issued.code.len(), 6);
    assert_eq!(mailer.last_otp_for(&email).as_deref(), Some(issued.code.as_str()));

    otp_service::verify(&state.orm, &email, &issued.code, Role::User).await?;

    let second = otp_service::verify(&state.orm, &email, &issued.code, Role::User).await;
    assert!(matches!(second, Err(OtpError::NotFound)), "{second:?}");

    Ok(())
}

// Issuing a new code supersedes the old one for the same (email, role).
#[tokio::test]
async fn otp_supersession_invalidates_prior_code() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let email = format!("{}@example.com", unique("otp-supersede"));

    let first = otp_service::issue(&state, &email, Role::User).await?;
    let second = otp_service::issue(&state, &email, Role::User).await?;
    if first.code == second.code {
        // Same code drawn twice; supersession is unobservable this run.
        return Ok(());
    }

    let stale = otp_service::verify(&state.orm, &email, &first.code, Role::User).await;
    assert!(matches!(stale, Err(OtpError::NotFound)), "{stale:?}");

    otp_service::verify(&state.orm, &email, &second.code, Role::User).await?;
    Ok(())
}

// Role tags keep USER and SELLER codes apart even for the same address.
#[tokio::test]
async fn otp_roles_are_disjoint() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let email = format!("{}@example.com", unique("otp-roles"));

    let user_code = otp_service::issue(&state, &email, Role::User).await?;
    let seller_code = otp_service::issue(&state, &email, Role::Seller).await?;

    // The seller issuance must not supersede the user code.
    otp_service::verify(&state.orm, &email, &user_code.code, Role::User).await?;
    otp_service::verify(&state.orm, &email, &seller_code.code, Role::Seller).await?;
    Ok(())
}

// A correct, unused code past its window fails with Expired and the row is
// left unused.
#[tokio::test]
async fn otp_expiry_rejects_stale_code() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let email = format!("{}@example.com", unique("otp-expired"));

    let created = Utc::now() - Duration::minutes(11);
    OtpActive {
        id: NotSet,
        email: Set(email.clone()),
        otp: Set("123456".to_string()),
        user_type: Set(Role::User.as_str().to_string()),
        created_at: Set(created.fixed_offset()),
        expires_at: Set((created + Duration::minutes(10)).fixed_offset()),
        used: Set(false),
    }
    .insert(&state.orm)
    .await?;

    let result = otp_service::verify(&state.orm, &email, "123456", Role::User).await;
    assert!(matches!(result, Err(OtpError::Expired)), "{result:?}");

    // Expired rows are not retroactively marked used.
    let row = EmailOtps::find()
        .filter(OtpCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .expect("row still present");
    assert!(!row.used);

    // The hourly sweep removes it.
    otp_service::sweep_expired(&state.orm).await?;
    let row = EmailOtps::find()
        .filter(OtpCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    assert!(row.is_none());

    Ok(())
}
