use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};

use crate::{
    audit::log_audit,
    dto::auth::{
        LoginRequest, LoginResponse, ResendOtpRequest, ResendOtpResponse, SignupRequest,
        SignupResponse, VerifyEmailRequest,
    },
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_user, issue_token},
    models::User,
    response::{ApiResponse, Meta},
    services::otp_service,
    state::AppState,
    validation::{validate_email, validate_password},
};

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string())
}

pub(crate) fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<SignupResponse>> {
    validate_email(&payload.email)?;

    // A verified account blocks re-registration; an unverified leftover row
    // is replaced so the signup can be retried.
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?
    {
        if existing.email_verified {
            return Err(AppError::BadRequest(
                "Email already registered and verified".to_string(),
            ));
        }
        existing.delete(&state.orm).await?;
    }

    if let Some(existing) = Users::find()
        .filter(UserCol::Username.eq(payload.username.as_str()))
        .one(&state.orm)
        .await?
    {
        if existing.email_verified {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }
        existing.delete(&state.orm).await?;
    }

    validate_password(&payload.password)?;

    let user = UserActive {
        id: NotSet,
        username: Set(payload.username),
        password_hash: Set(hash_password(&payload.password)?),
        email: Set(Some(payload.email.clone())),
        email_verified: Set(false),
        phone_number: Set(payload.phone_number),
        alternate_number: Set(None),
        address: Set(payload.address),
        photo: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = user.id, email = %payload.email, "user registered, starting OTP flow");

    let otp = otp_service::issue(state, &payload.email, Role::User).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_signup",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let response = if otp.email_sent {
        SignupResponse {
            user_id: user.id,
            email: user.email,
            message: "Registration successful. Please verify your email with the OTP sent to your email address.".to_string(),
            otp: None,
            email_delivery_failed: None,
        }
    } else {
        SignupResponse {
            user_id: user.id,
            email: user.email,
            message: "Registration successful. OTP generated but email delivery failed. Use the resend-otp endpoint or the code below.".to_string(),
            otp: Some(otp.code),
            email_delivery_failed: Some(true),
        }
    };

    Ok(ApiResponse::success(
        "OTP sent to your email. Please verify to complete registration.",
        response,
        Some(Meta::empty()),
    ))
}

pub async fn verify_email(
    state: &AppState,
    payload: VerifyEmailRequest,
) -> AppResult<ApiResponse<User>> {
    otp_service::verify(&state.orm, &payload.email, &payload.otp, Role::User).await?;

    let user = Users::find()
        .filter(UserCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = user.into();
    active.email_verified = Set(true);
    let user = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Email verified successfully",
        User::from_entity(user),
        Some(Meta::empty()),
    ))
}

pub async fn resend_otp(
    state: &AppState,
    payload: ResendOtpRequest,
) -> AppResult<ApiResponse<ResendOtpResponse>> {
    if payload.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let user = Users::find()
        .filter(UserCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if user.email_verified {
        return Err(AppError::BadRequest("Email already verified".to_string()));
    }

    let otp = otp_service::issue(state, &payload.email, Role::User).await?;

    let response = if otp.email_sent {
        ResendOtpResponse {
            message: "OTP resent to your email".to_string(),
            otp: None,
            email_delivery_failed: None,
        }
    } else {
        ResendOtpResponse {
            message: "OTP generated but email delivery failed. Please try again.".to_string(),
            otp: Some(otp.code),
            email_delivery_failed: Some(true),
        }
    };

    Ok(ApiResponse::success(
        "OTP resent successfully",
        response,
        Some(Meta::empty()),
    ))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    // One generic message for unknown usernames and wrong passwords.
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let user = Users::find()
        .filter(UserCol::Username.eq(payload.username.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&user.password_hash, &payload.password) {
        return Err(invalid());
    }

    // Accounts without an email predate verification and stay usable.
    if user.email.as_deref().is_some_and(|e| !e.is_empty()) && !user.email_verified {
        return Err(AppError::Forbidden(
            "Please verify your email before logging in. Check your inbox for the OTP or use the resend-otp endpoint.".to_string(),
        ));
    }

    let token = issue_token(&user.id.to_string(), Role::User)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            user: User::from_entity(user),
        },
        Some(Meta::empty()),
    ))
}

pub async fn me(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<User>> {
    ensure_user(auth)?;
    let user = Users::find_by_id(auth.account_id()?)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "OK",
        User::from_entity(user),
        None,
    ))
}
