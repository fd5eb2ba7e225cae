use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::wishlist::WishlistItemDto,
    entity::wishlist_items::{
        ActiveModel as WishlistActive, Column as WishlistCol, Entity as WishlistItems,
    },
    entity::Products,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_user},
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
};

pub async fn get_wishlist(
    state: &AppState,
    auth: &AuthUser,
) -> AppResult<ApiResponse<Vec<WishlistItemDto>>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    let rows = WishlistItems::find()
        .filter(WishlistCol::UserId.eq(user_id))
        .order_by_desc(WishlistCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(model) = Products::find_by_id(row.product_id)
            .one(&state.orm)
            .await?
        else {
            continue;
        };
        items.push(WishlistItemDto {
            id: row.id,
            product: product_service::load_view(&state.orm, model).await?,
        });
    }

    Ok(ApiResponse::success("OK", items, Some(Meta::empty())))
}

pub async fn add_to_wishlist(
    state: &AppState,
    auth: &AuthUser,
    product_id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    let product = Products::find_by_id(product_id).one(&state.orm).await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let exists = WishlistItems::find()
        .filter(WishlistCol::UserId.eq(user_id))
        .filter(WishlistCol::ProductId.eq(product_id))
        .one(&state.orm)
        .await?
        .is_some();
    if exists {
        return Err(AppError::BadRequest(
            "Product already in wishlist".to_string(),
        ));
    }

    WishlistActive {
        id: NotSet,
        user_id: Set(user_id),
        product_id: Set(product_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Item added to wishlist",
        serde_json::json!({ "productId": product_id }),
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_wishlist(
    state: &AppState,
    auth: &AuthUser,
    product_id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    let result = WishlistItems::delete_many()
        .filter(WishlistCol::UserId.eq(user_id))
        .filter(WishlistCol::ProductId.eq(product_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Item removed from wishlist",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn check_wishlist(
    state: &AppState,
    auth: &AuthUser,
    product_id: i32,
) -> AppResult<ApiResponse<bool>> {
    ensure_user(auth)?;
    let user_id = auth.account_id()?;

    let exists = WishlistItems::find()
        .filter(WishlistCol::UserId.eq(user_id))
        .filter(WishlistCol::ProductId.eq(product_id))
        .one(&state.orm)
        .await?
        .is_some();

    Ok(ApiResponse::success("OK", exists, Some(Meta::empty())))
}
