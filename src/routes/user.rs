use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, put},
};

use crate::{
    dto::users::{HomeResponse, UserProfileUpdate},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    routes::seller::read_file_field,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/profile", put(update_profile))
        .route("/home", get(home))
}

#[utoipa::path(get, path = "/api/v1/user/profile", security(("bearer_auth" = [])), tag = "User")]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/user/profile",
    responses(
        (status = 200, description = "Profile updated from multipart form", body = ApiResponse<User>),
        (status = 400, description = "Invalid photo"),
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut update = UserProfileUpdate::default();
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        AppError::BadRequest(format!("Malformed multipart request: {err}"))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => update.photo = Some(read_file_field(field).await?),
            "alternateNumber" => {
                update.alternate_number = Some(field.text().await.map_err(|err| {
                    AppError::BadRequest(format!("Malformed multipart request: {err}"))
                })?)
            }
            "address" => {
                update.address = Some(field.text().await.map_err(|err| {
                    AppError::BadRequest(format!("Malformed multipart request: {err}"))
                })?)
            }
            _ => {}
        }
    }

    let resp = user_service::update_profile(&state, &user, update).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/v1/user/home", security(("bearer_auth" = [])), tag = "User")]
pub async fn home(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<HomeResponse>>> {
    let resp = user_service::home(&state, &user).await?;
    Ok(Json(resp))
}
