use sea_orm::EntityTrait;
use sqlx::FromRow;

use crate::{
    audit::log_audit,
    dto::cart::{CartItemDto, CartResponse},
    entity::Products,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_user},
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
};

#[derive(FromRow)]
struct CartRow {
    product_id: i32,
    quantity: i32,
}

pub async fn get_cart(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<CartResponse>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    let rows = sqlx::query_as::<_, CartRow>(
        "SELECT product_id, quantity FROM cart_items WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let mut items = Vec::with_capacity(rows.len());
    let mut total = 0.0;
    for row in rows {
        let Some(model) = Products::find_by_id(row.product_id).one(&state.orm).await? else {
            continue;
        };
        let product = product_service::load_view(&state.orm, model).await?;
        let subtotal = product.price * row.quantity as f64;
        total += subtotal;
        items.push(CartItemDto {
            product,
            quantity: row.quantity,
            subtotal,
        });
    }

    Ok(ApiResponse::success(
        "OK",
        CartResponse { items, total },
        Some(Meta::empty()),
    ))
}

/// Add to cart. Re-adding a product already in the cart increments its
/// quantity; the upsert makes concurrent adds sum instead of losing updates.
pub async fn add_to_cart(
    state: &AppState,
    auth: &AuthUser,
    product_id: i32,
    quantity: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let product = Products::find_by_id(product_id).one(&state.orm).await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let (new_quantity,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO cart_items (user_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        RETURNING quantity
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user_id),
        "cart_add",
        Some("cart_items"),
        Some(serde_json::json!({ "product_id": product_id, "quantity": new_quantity })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Item added to cart",
        serde_json::json!({ "productId": product_id, "quantity": new_quantity }),
        Some(Meta::empty()),
    ))
}

/// Set the quantity outright; zero or less removes the row.
pub async fn update_quantity(
    state: &AppState,
    auth: &AuthUser,
    product_id: i32,
    quantity: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    if quantity <= 0 {
        return remove_from_cart(state, auth, product_id).await;
    }

    let result = sqlx::query(
        "UPDATE cart_items SET quantity = $3 WHERE user_id = $1 AND product_id = $2",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Cart updated",
        serde_json::json!({ "productId": product_id, "quantity": quantity }),
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_cart(
    state: &AppState,
    auth: &AuthUser,
    product_id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user_id),
        "cart_remove",
        Some("cart_items"),
        Some(serde_json::json!({ "product_id": product_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Item removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
