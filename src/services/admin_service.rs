use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    audit::log_audit,
    dto::admin::{
        AdminLoginResponse, ProductList, ProductUpdateRequest, SellerList, SellerUpdateRequest,
        UserList, UserUpdateRequest,
    },
    dto::auth::LoginRequest,
    entity::products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products},
    entity::sellers::{ActiveModel as SellerActive, Column as SellerCol, Entity as Sellers},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_admin, issue_token},
    models::{Product, Seller, User},
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
};

/// The admin is a configuration-supplied credential checked through the same
/// password-verification path as the other roles; there is no admin row.
pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AdminLoginResponse>> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    if payload.username != state.config.admin_username {
        return Err(invalid());
    }
    if state.config.admin_password_hash.is_empty()
        || !super::auth_service::verify_password(
            &state.config.admin_password_hash,
            &payload.password,
        )
    {
        return Err(invalid());
    }

    let token = issue_token(&state.config.admin_username, Role::Admin)?;

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "admin_login",
        None,
        Some(serde_json::json!({ "username": state.config.admin_username })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Login successful",
        AdminLoginResponse {
            token,
            token_type: "Bearer".to_string(),
            username: state.config.admin_username.clone(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_users(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(auth)?;
    let items = Users::find()
        .order_by_asc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from_entity)
        .collect();
    Ok(ApiResponse::success("OK", UserList { items }, None))
}

pub async fn list_sellers(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<SellerList>> {
    ensure_admin(auth)?;
    let items = Sellers::find()
        .order_by_asc(SellerCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Seller::from_entity)
        .collect();
    Ok(ApiResponse::success("OK", SellerList { items }, None))
}

pub async fn list_products(
    state: &AppState,
    auth: &AuthUser,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(auth)?;
    let models = Products::find()
        .order_by_asc(ProdCol::Id)
        .all(&state.orm)
        .await?;
    let items = product_service::load_views(&state.orm, models).await?;
    Ok(ApiResponse::success("OK", ProductList { items }, None))
}

pub async fn update_user(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
    payload: UserUpdateRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(auth)?;
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = user.into();
    if let Some(username) = payload.username {
        active.username = Set(username);
    }
    if let Some(phone) = payload.phone_number {
        active.phone_number = Set(Some(phone));
    }
    if let Some(alternate) = payload.alternate_number {
        active.alternate_number = Set(Some(alternate));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    let user = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "User updated successfully",
        User::from_entity(user),
        Some(Meta::empty()),
    ))
}

pub async fn update_seller(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
    payload: SellerUpdateRequest,
) -> AppResult<ApiResponse<Seller>> {
    ensure_admin(auth)?;
    let seller = Sellers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: SellerActive = seller.into();
    if let Some(username) = payload.username {
        active.username = Set(username);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(whatsapp) = payload.whatsapp_number {
        active.whatsapp_number = Set(Some(whatsapp));
    }
    if let Some(business_email) = payload.business_email {
        active.business_email = Set(Some(business_email));
    }
    if let Some(gst) = payload.gst_number {
        active.gst_number = Set(Some(gst));
    }
    let seller = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Seller updated successfully",
        Seller::from_entity(seller),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
    payload: ProductUpdateRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(auth)?;
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ProductActive = product.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category) = payload.category {
        active.category = Set(Some(category));
    }
    if let Some(unique_id) = payload.unique_product_id {
        active.unique_product_id = Set(Some(unique_id));
    }
    let product = active.update(&state.orm).await?;

    let view = product_service::load_view(&state.orm, product).await?;
    Ok(ApiResponse::success(
        "Product updated successfully",
        view,
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(auth)?;
    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "admin_delete_user",
        Some("users"),
        Some(serde_json::json!({ "user_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn delete_seller(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(auth)?;
    let result = Sellers::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "admin_delete_seller",
        Some("sellers"),
        Some(serde_json::json!({ "seller_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Seller deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(auth)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "admin_delete_product",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
