use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    audit::log_audit,
    dto::payment::{
        BuyNowResponse, CreateOrderRequest, CreateOrderResponse, OrderList,
        PaymentSuccessRequest, SaveAddressRequest,
    },
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    entity::users::ActiveModel as UserActive,
    entity::Products,
    error::{AppError, AppResult},
    gateway::verify_signature,
    middleware::auth::AuthUser,
    models::Order,
    response::{ApiResponse, Meta},
    services::{product_service, user_service},
    state::AppState,
};

const CURRENCY: &str = "INR";

fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub async fn buy_now(
    state: &AppState,
    auth: &AuthUser,
    product_id: i32,
    quantity: i32,
) -> AppResult<ApiResponse<BuyNowResponse>> {
    let user = user_service::find_by_id(state, auth).await?;

    let model = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let product = product_service::load_view(&state.orm, model).await?;

    let amount = product.price * quantity as f64;
    let needs_address = user
        .address
        .as_deref()
        .map(|a| a.trim().is_empty())
        .unwrap_or(true);

    Ok(ApiResponse::success(
        "OK",
        BuyNowResponse {
            product,
            quantity,
            amount,
            needs_address,
        },
        Some(Meta::empty()),
    ))
}

pub async fn save_address(
    state: &AppState,
    auth: &AuthUser,
    payload: SaveAddressRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let user = user_service::find_by_id(state, auth).await?;

    let mut active: UserActive = user.into();
    active.address = Set(Some(payload.address));
    active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Address saved successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Mint a gateway-side order reference for a pending charge.
pub async fn create_order(
    state: &AppState,
    auth: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<CreateOrderResponse>> {
    let user = user_service::find_by_id(state, auth).await?;

    if payload.amount <= 0 {
        return Err(AppError::BadRequest(
            "amount must be greater than 0".to_string(),
        ));
    }

    let receipt = format!("txn_{}", Utc::now().timestamp_millis());
    let order = state
        .gateway
        .create_order(payload.amount, CURRENCY, &receipt)
        .await
        .map_err(AppError::Upstream)?;

    tracing::info!(user_id = user.id, gateway_order_id = %order.id, amount = order.amount, "gateway order created");

    Ok(ApiResponse::success(
        "Order created",
        CreateOrderResponse {
            id: order.id,
            amount: order.amount,
            key: state.config.gateway_key_id.clone(),
        },
        Some(Meta::empty()),
    ))
}

/// Record a completed payment. The client-submitted signature is checked
/// against the gateway secret before anything is written; buy-now amounts
/// are recomputed from the product row rather than trusted.
pub async fn record_success(
    state: &AppState,
    auth: &AuthUser,
    payload: PaymentSuccessRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let user = user_service::find_by_id(state, auth).await?;

    if !verify_signature(
        &state.config.gateway_key_secret,
        &payload.order_id,
        &payload.payment_id,
        &payload.signature,
    ) {
        tracing::warn!(user_id = user.id, order_id = %payload.order_id, "payment signature mismatch");
        return Err(AppError::BadRequest(
            "Invalid payment signature".to_string(),
        ));
    }

    let amount = if payload.is_buy_now.unwrap_or(false) {
        let product_id = payload
            .product_id
            .ok_or_else(|| AppError::BadRequest("productId is required for buy-now".to_string()))?;
        let quantity = payload.quantity.unwrap_or(1);
        let product = Products::find_by_id(product_id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::NotFound)?;
        to_minor_units(product.price * quantity as f64)
    } else {
        payload
            .amount
            .ok_or_else(|| AppError::BadRequest("amount is required".to_string()))?
    };

    let order = OrderActive {
        id: NotSet,
        user_id: Set(user.id),
        gateway_order_id: Set(payload.order_id),
        gateway_payment_id: Set(payload.payment_id),
        gateway_signature: Set(payload.signature),
        amount: Set(amount),
        email: Set(user.email.clone().or_else(|| Some(user.username.clone()))),
        order_date: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "payment_recorded",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "amount": amount })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Payment successful",
        serde_json::json!({ "orderId": order.id }),
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let user = user_service::find_by_id(state, auth).await?;

    let items = Orders::find()
        .filter(OrderCol::UserId.eq(user.id))
        .order_by_desc(OrderCol::OrderDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from_entity)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderList { items },
        Some(Meta::empty()),
    ))
}
