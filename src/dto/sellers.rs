use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::Seller, validation::UploadedFile};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerSignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub business_email: Option<String>,
    #[serde(default)]
    pub gst_number: Option<String>,
    /// Optional base64-encoded profile photo for JSON signups.
    #[serde(default)]
    pub photo_base64: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerSignupResponse {
    pub seller_id: i32,
    pub email: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_delivery_failed: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerLoginResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub seller: Seller,
}

/// Profile update parsed out of a multipart form.
#[derive(Debug, Default)]
pub struct SellerProfileUpdate {
    pub whatsapp_number: Option<String>,
    pub business_email: Option<String>,
    pub gst_number: Option<String>,
    pub photo: Option<UploadedFile>,
}
