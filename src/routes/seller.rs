use axum::{
    Json, Router,
    extract::{Multipart, State, multipart::Field},
    routing::{get, post, put},
};

use crate::{
    dto::auth::{LoginRequest, ResendOtpRequest, ResendOtpResponse, VerifyEmailRequest},
    dto::products::{ProductList, ProductUpload},
    dto::sellers::{
        SellerLoginResponse, SellerProfileUpdate, SellerSignupRequest, SellerSignupResponse,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, Seller},
    response::ApiResponse,
    services::{product_service, seller_service},
    state::AppState,
    validation::UploadedFile,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/verify-email", post(verify_email))
        .route("/resend-otp", post(resend_otp))
        .route("/profile", get(profile))
        .route("/profile", put(update_profile))
        .route("/products", get(my_products))
        .route("/products", post(upload_product))
        .route("/dashboard", get(dashboard))
        .route("/home", get(home))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart request: {err}"))
}

pub(crate) async fn read_file_field(field: Field<'_>) -> AppResult<UploadedFile> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await.map_err(bad_multipart)?.to_vec();
    Ok(UploadedFile {
        file_name,
        content_type,
        data,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/seller/signup",
    request_body = SellerSignupRequest,
    responses(
        (status = 201, description = "Seller created, OTP flow started", body = ApiResponse<SellerSignupResponse>),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Seller"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SellerSignupRequest>,
) -> AppResult<Json<ApiResponse<SellerSignupResponse>>> {
    let resp = seller_service::signup(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/v1/seller/login", request_body = LoginRequest, tag = "Seller")]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<SellerLoginResponse>>> {
    let resp = seller_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/v1/seller/verify-email", request_body = VerifyEmailRequest, tag = "Seller")]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let resp = seller_service::verify_email(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/v1/seller/resend-otp", request_body = ResendOtpRequest, tag = "Seller")]
pub async fn resend_otp(
    State(state): State<AppState>,
    Json(payload): Json<ResendOtpRequest>,
) -> AppResult<Json<ApiResponse<ResendOtpResponse>>> {
    let resp = seller_service::resend_otp(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/seller/profile", security(("bearer_auth" = [])), tag = "Seller")]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let resp = seller_service::profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/api/v1/seller/profile", security(("bearer_auth" = [])), tag = "Seller")]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let mut update = SellerProfileUpdate::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => update.photo = Some(read_file_field(field).await?),
            "whatsappNumber" => {
                update.whatsapp_number = Some(field.text().await.map_err(bad_multipart)?)
            }
            "businessEmail" => {
                update.business_email = Some(field.text().await.map_err(bad_multipart)?)
            }
            "gstNumber" => update.gst_number = Some(field.text().await.map_err(bad_multipart)?),
            _ => {}
        }
    }

    let resp = seller_service::update_profile(&state, &user, update).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/seller/products", security(("bearer_auth" = [])), tag = "Seller")]
pub async fn my_products(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let seller = seller_service::find_by_id(&state, &user).await?;
    let resp = product_service::seller_products(&state, seller.id).await?;
    Ok(Json(resp))
}

/// Multipart product upload: scalar columns as text parts, `productImages`
/// and `documents` as file parts, `specifications`/`variants` as JSON text
/// parts.
#[utoipa::path(
    post,
    path = "/api/v1/seller/products",
    responses(
        (status = 201, description = "Product created from multipart form", body = ApiResponse<Product>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Seller"
)]
pub async fn upload_product(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Product>>> {
    let seller = seller_service::find_by_id(&state, &user).await?;

    let mut upload = ProductUpload::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "productImages" | "productImage" => {
                upload.images.push(read_file_field(field).await?);
            }
            "documents" => {
                upload.documents.push(read_file_field(field).await?);
            }
            _ => {
                let value = field.text().await.map_err(bad_multipart)?;
                upload.set_text_field(&name, value)?;
            }
        }
    }

    let resp = product_service::create_product(&state, &user, &seller, upload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/seller/dashboard", security(("bearer_auth" = [])), tag = "Seller")]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    seller_service::find_by_id(&state, &user).await?;
    let categories = product_service::distinct_categories(&state.orm).await?;
    Ok(Json(ApiResponse::success("OK", categories, None)))
}

#[utoipa::path(get, path = "/api/v1/seller/home", security(("bearer_auth" = [])), tag = "Seller")]
pub async fn home(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let resp = seller_service::profile(&state, &user).await?;
    Ok(Json(resp))
}
