use base64::Engine;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    audit::log_audit,
    dto::auth::{LoginRequest, ResendOtpRequest, ResendOtpResponse, VerifyEmailRequest},
    dto::sellers::{
        SellerLoginResponse, SellerProfileUpdate, SellerSignupRequest, SellerSignupResponse,
    },
    entity::sellers::{ActiveModel as SellerActive, Column as SellerCol, Entity as Sellers, Model as SellerModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_seller, issue_token},
    models::Seller,
    response::{ApiResponse, Meta},
    services::{auth_service, otp_service},
    state::AppState,
    validation::{validate_email, validate_password, validate_profile_photo},
};

pub(crate) async fn find_by_id(state: &AppState, auth: &AuthUser) -> AppResult<SellerModel> {
    ensure_seller(auth)?;
    Sellers::find_by_id(auth.account_id()?)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn signup(
    state: &AppState,
    payload: SellerSignupRequest,
) -> AppResult<ApiResponse<SellerSignupResponse>> {
    if payload.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    if payload.password.trim().is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }
    validate_email(&payload.email)?;

    let email_taken = Sellers::find()
        .filter(SellerCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?
        .is_some();
    if email_taken {
        return Err(AppError::BadRequest("Email already registered".to_string()));
    }

    let username_taken = Sellers::find()
        .filter(SellerCol::Username.eq(payload.username.as_str()))
        .one(&state.orm)
        .await?
        .is_some();
    if username_taken {
        return Err(AppError::BadRequest("Username already exists".to_string()));
    }

    validate_password(&payload.password)?;

    let photo = match payload.photo_base64.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(encoded) => Some(
            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|_| {
                    AppError::BadRequest(
                        "Invalid photo format. Please provide a valid base64 encoded image."
                            .to_string(),
                    )
                })?,
        ),
        None => None,
    };

    let seller = SellerActive {
        id: NotSet,
        username: Set(payload.username),
        password_hash: Set(auth_service::hash_password(&payload.password)?),
        email: Set(payload.email.clone()),
        email_verified: Set(false),
        whatsapp_number: Set(payload.whatsapp_number),
        business_email: Set(payload.business_email),
        gst_number: Set(payload.gst_number),
        photo: Set(photo),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(seller_id = seller.id, email = %payload.email, "seller registered");

    let otp = otp_service::issue(state, &payload.email, Role::Seller).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(seller.id),
        "seller_signup",
        Some("sellers"),
        Some(serde_json::json!({ "seller_id": seller.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let response = if otp.email_sent {
        SellerSignupResponse {
            seller_id: seller.id,
            email: seller.email,
            message: "Registration successful. Please verify your email with the OTP sent to your email address.".to_string(),
            otp: None,
            email_delivery_failed: None,
        }
    } else {
        SellerSignupResponse {
            seller_id: seller.id,
            email: seller.email,
            message: "Registration successful. OTP generated but email delivery failed. Use the resend-otp endpoint or the code below.".to_string(),
            otp: Some(otp.code),
            email_delivery_failed: Some(true),
        }
    };

    Ok(ApiResponse::success(
        "Registration successful",
        response,
        Some(Meta::empty()),
    ))
}

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<SellerLoginResponse>> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let seller = Sellers::find()
        .filter(SellerCol::Username.eq(payload.username.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(invalid)?;

    if !auth_service::verify_password(&seller.password_hash, &payload.password) {
        return Err(invalid());
    }

    let token = issue_token(&seller.id.to_string(), Role::Seller)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(seller.id),
        "seller_login",
        Some("sellers"),
        Some(serde_json::json!({ "seller_id": seller.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Login successful",
        SellerLoginResponse {
            token,
            token_type: "Bearer".to_string(),
            seller: Seller::from_entity(seller),
        },
        Some(Meta::empty()),
    ))
}

pub async fn verify_email(
    state: &AppState,
    payload: VerifyEmailRequest,
) -> AppResult<ApiResponse<Seller>> {
    otp_service::verify(&state.orm, &payload.email, &payload.otp, Role::Seller).await?;

    let seller = Sellers::find()
        .filter(SellerCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: SellerActive = seller.into();
    active.email_verified = Set(true);
    let seller = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Email verified successfully",
        Seller::from_entity(seller),
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

    let seller = Sellers::find()
        .filter(SellerCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if seller.email_verified {
        return Err(AppError::BadRequest("Email already verified".to_string()));
    }

    let otp = otp_service::issue(state, &payload.email, Role::Seller).await?;

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

pub async fn profile(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<Seller>> {
    let seller = find_by_id(state, auth).await?;
    Ok(ApiResponse::success("OK", Seller::from_entity(seller), None))
}

pub async fn update_profile(
    state: &AppState,
    auth: &AuthUser,
    update: SellerProfileUpdate,
) -> AppResult<ApiResponse<Seller>> {
    let seller = find_by_id(state, auth).await?;

    let mut active: SellerActive = seller.into();
    if let Some(whatsapp) = update.whatsapp_number {
        active.whatsapp_number = Set(Some(whatsapp));
    }
    if let Some(business_email) = update.business_email {
        active.business_email = Set(Some(business_email));
    }
    if let Some(gst) = update.gst_number {
        active.gst_number = Set(Some(gst));
    }
    if let Some(photo) = update.photo {
        validate_profile_photo(&photo)?;
        active.photo = Set(Some(photo.data));
    }

    let seller = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Profile updated successfully",
        Seller::from_entity(seller),
        Some(Meta::empty()),
    ))
}
