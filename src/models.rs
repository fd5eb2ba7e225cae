use std::collections::BTreeMap;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub phone_number: Option<String>,
    pub alternate_number: Option<String>,
    pub address: Option<String>,
    pub photo_base64: Option<String>,
}

impl User {
    pub fn from_entity(model: crate::entity::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            email_verified: model.email_verified,
            phone_number: model.phone_number,
            alternate_number: model.alternate_number,
            address: model.address,
            photo_base64: model.photo.map(encode_photo),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub whatsapp_number: Option<String>,
    pub business_email: Option<String>,
    pub gst_number: Option<String>,
    pub photo_base64: Option<String>,
}

impl Seller {
    pub fn from_entity(model: crate::entity::sellers::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            email_verified: model.email_verified,
            whatsapp_number: model.whatsapp_number,
            business_email: model.business_email,
            gst_number: model.gst_number,
            photo_base64: model.photo.map(encode_photo),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub seller_id: Option<i32>,
    pub name: String,
    pub brand_name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub key_features: Option<String>,
    pub mrp: Option<f64>,
    /// Falls back to the legacy `price` when unset on the row.
    pub selling_price: f64,
    pub price: f64,
    pub discount_percent: Option<f64>,
    pub gst_included: Option<bool>,
    pub minimum_order_quantity: Option<i32>,
    pub available_quantity: Option<i32>,
    pub sku_id: Option<String>,
    pub stock_availability: Option<String>,
    pub package_weight: Option<f64>,
    pub package_length: Option<f64>,
    pub package_width: Option<f64>,
    pub package_height: Option<f64>,
    pub pickup_address: Option<String>,
    pub delivery_method: Option<String>,
    pub gst_number: Option<String>,
    pub hsn_code: Option<String>,
    pub invoice_required: Option<bool>,
    pub brand_authorized: Option<bool>,
    pub trademark_verified: Option<bool>,
    pub compliance_certificates: Option<Vec<String>>,
    pub return_policy: Option<String>,
    pub replacement_available: Option<bool>,
    pub warranty_details: Option<String>,
    pub unique_product_id: Option<String>,
    pub image_urls: Vec<String>,
    pub primary_image_url: Option<String>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub variants: Option<Vec<Variant>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: i32,
    #[serde(rename = "type")]
    pub variant_type: String,
    pub value: String,
    pub price_modifier: f64,
    pub stock: i32,
    pub sku: Option<String>,
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub order_id: String,
    pub payment_id: String,
    /// Major currency units for display; stored in minor units.
    pub amount: f64,
    pub order_date: DateTime<Utc>,
    pub email: Option<String>,
}

impl Order {
    pub fn from_entity(model: crate::entity::orders::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.gateway_order_id,
            payment_id: model.gateway_payment_id,
            amount: model.amount as f64 / 100.0,
            order_date: model.order_date.with_timezone(&Utc),
            email: model.email,
        }
    }
}

fn encode_photo(bytes: Vec<u8>) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
