use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
};

use crate::{
    error::{AppError, AppResult},
    services::product_service,
    state::AppState,
};

/// Public binary passthrough for product images; mounted at the root, not
/// under /api/v1.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product-image/{product_id}", get(primary_image))
        .route("/product-image/{product_id}/{image_id}", get(image_by_id))
}

fn image_response(data: Vec<u8>, name: Option<String>) -> impl IntoResponse {
    let disposition = match name {
        Some(name) => format!("inline; filename=\"{name}\""),
        None => "inline".to_string(),
    };
    (
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
}

#[utoipa::path(
    get,
    path = "/product-image/{product_id}",
    params(("product_id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Primary image bytes"),
        (status = 404, description = "No image"),
    ),
    tag = "Images"
)]
pub async fn primary_image(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let (data, name) = product_service::primary_image(&state.orm, product_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(image_response(data, name))
}

#[utoipa::path(
    get,
    path = "/product-image/{product_id}/{image_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("image_id" = i32, Path, description = "Image ID"),
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "No such image for this product"),
    ),
    tag = "Images"
)]
pub async fn image_by_id(
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(i32, i32)>,
) -> AppResult<impl IntoResponse> {
    let (data, name) = product_service::image_by_id(&state.orm, product_id, image_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(image_response(data, name))
}
