use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistItemDto {
    pub id: i32,
    pub product: Product,
}
