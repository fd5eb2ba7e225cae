use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::payment::{
        BuyNowResponse, CreateOrderRequest, CreateOrderResponse, OrderList,
        PaymentSuccessRequest, SaveAddressRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::QuantityQuery,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buy-now/{product_id}", get(buy_now))
        .route("/buy-now/address", post(save_address))
        .route("/create-order", post(create_order))
        .route("/success", post(payment_success))
        .route("/orders", get(list_orders))
}

#[utoipa::path(
    get,
    path = "/api/v1/payment/buy-now/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("quantity" = Option<i32>, Query, description = "Quantity, default 1"),
    ),
    responses(
        (status = 200, description = "Amount and address requirement", body = ApiResponse<BuyNowResponse>)
    ),
    security(("bearer_auth" = [])),
    tag = "Payment"
)]
pub async fn buy_now(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<i32>,
    Query(query): Query<QuantityQuery>,
) -> AppResult<Json<ApiResponse<BuyNowResponse>>> {
    let quantity = query.quantity.unwrap_or(1);
    let resp = payment_service::buy_now(&state, &user, product_id, quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/v1/payment/buy-now/address", request_body = SaveAddressRequest, security(("bearer_auth" = [])), tag = "Payment")]
pub async fn save_address(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SaveAddressRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = payment_service::save_address(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/payment/create-order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Gateway order reference", body = ApiResponse<CreateOrderResponse>),
        (status = 500, description = "Gateway failure"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payment"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<CreateOrderResponse>>> {
    let resp = payment_service::create_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/payment/success",
    request_body = PaymentSuccessRequest,
    responses(
        (status = 200, description = "Payment recorded"),
        (status = 400, description = "Signature mismatch"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payment"
)]
pub async fn payment_success(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PaymentSuccessRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = payment_service::record_success(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/payment/orders", security(("bearer_auth" = [])), tag = "Payment")]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = payment_service::list_orders(&state, &user).await?;
    Ok(Json(resp))
}
