use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDto {
    pub product: Product,
    pub quantity: i32,
    pub subtotal: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemDto>,
    pub total: f64,
}
