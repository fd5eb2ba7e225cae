use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};

use crate::{
    dto::admin::{
        AdminLoginResponse, ProductList, ProductUpdateRequest, SellerList, SellerUpdateRequest,
        UserList, UserUpdateRequest,
    },
    dto::auth::LoginRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Product, Seller, User},
    response::ApiResponse,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/users", get(list_users))
        .route("/users/{id}", put(update_user))
        .route("/users/{id}", delete(delete_user))
        .route("/sellers", get(list_sellers))
        .route("/sellers/{id}", put(update_seller))
        .route("/sellers/{id}", delete(delete_seller))
        .route("/products", get(list_products))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin token", body = ApiResponse<AdminLoginResponse>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AdminLoginResponse>>> {
    let resp = admin_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/admin/users", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = admin_service::list_users(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/admin/sellers", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn list_sellers(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SellerList>>> {
    let resp = admin_service::list_sellers(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/admin/products", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::list_products(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UserUpdateRequest,
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UserUpdateRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = admin_service::update_user(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/sellers/{id}",
    params(("id" = i32, Path, description = "Seller ID")),
    request_body = SellerUpdateRequest,
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<SellerUpdateRequest>,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let resp = admin_service::update_seller(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductUpdateRequest,
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<ProductUpdateRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/v1/admin/users/{id}", params(("id" = i32, Path)), security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/v1/admin/sellers/{id}", params(("id" = i32, Path)), security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_seller(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/v1/admin/products/{id}", params(("id" = i32, Path)), security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}
