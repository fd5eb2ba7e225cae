use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};

use crate::{
    dto::cart::CartResponse,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::QuantityQuery,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart))
        .route("/add/{product_id}", post(add_to_cart))
        .route("/update/{product_id}", put(update_quantity))
        .route("/remove/{product_id}", delete(remove_from_cart))
}

#[utoipa::path(get, path = "/api/v1/cart", security(("bearer_auth" = [])), tag = "Cart")]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::get_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart/add/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("quantity" = Option<i32>, Query, description = "Quantity to add, default 1"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<i32>,
    Query(query): Query<QuantityQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let quantity = query.quantity.unwrap_or(1);
    let resp = cart_service::add_to_cart(&state, &user, product_id, quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/cart/update/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("quantity" = i32, Query, description = "New quantity; zero or less removes the item"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<i32>,
    Query(query): Query<QuantityQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let quantity = query.quantity.unwrap_or(1);
    let resp = cart_service::update_quantity(&state, &user, product_id, quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/remove/{product_id}",
    params(("product_id" = i32, Path, description = "Product ID")),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::remove_from_cart(&state, &user, product_id).await?;
    Ok(Json(resp))
}
