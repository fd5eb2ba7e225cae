use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    dto::users::{HomeResponse, UserProfileUpdate},
    entity::products::{Column as ProdCol, Entity as Products},
    entity::users::{ActiveModel as UserActive, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_user},
    models::User,
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
    validation::validate_profile_photo,
};

pub(crate) async fn find_by_id(state: &AppState, auth: &AuthUser) -> AppResult<UserModel> {
    ensure_user(auth)?;
    Users::find_by_id(auth.account_id()?)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn profile(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<User>> {
    let user = find_by_id(state, auth).await?;
    Ok(ApiResponse::success("OK", User::from_entity(user), None))
}

pub async fn update_profile(
    state: &AppState,
    auth: &AuthUser,
    update: UserProfileUpdate,
) -> AppResult<ApiResponse<User>> {
    let user = find_by_id(state, auth).await?;

    let mut active: UserActive = user.into();
    if let Some(alternate) = update.alternate_number {
        active.alternate_number = Set(Some(alternate));
    }
    if let Some(address) = update.address {
        active.address = Set(Some(address));
    }
    if let Some(photo) = update.photo {
        validate_profile_photo(&photo)?;
        active.photo = Set(Some(photo.data));
    }

    let user = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Profile updated successfully",
        User::from_entity(user),
        Some(Meta::empty()),
    ))
}

/// Home payload for the storefront landing page: profile, full catalog and
/// category list in one round trip.
pub async fn home(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<HomeResponse>> {
    let user = find_by_id(state, auth).await?;

    let models = Products::find()
        .order_by_asc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?;
    let products = product_service::load_views(&state.orm, models).await?;
    let categories = product_service::distinct_categories(&state.orm).await?;

    Ok(ApiResponse::success(
        "Home data retrieved successfully",
        HomeResponse {
            user: User::from_entity(user),
            products,
            categories,
        },
        Some(Meta::empty()),
    ))
}
