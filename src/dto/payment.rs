use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, Product};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuyNowResponse {
    pub product: Product,
    pub quantity: i32,
    /// Major currency units.
    pub amount: f64,
    pub needs_address: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveAddressRequest {
    pub address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Minor currency units.
    pub amount: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: String,
    pub amount: i64,
    pub key: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    /// Cart checkout total in minor units, supplied by the caller.
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub is_buy_now: Option<bool>,
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
