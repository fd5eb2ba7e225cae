use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Product,
    validation::UploadedFile,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

/// One variant entry from the `variants` JSON form field, e.g.
/// `[{"type": "size", "value": "XL", "priceModifier": 0, "stock": 10}]`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantUpload {
    #[serde(rename = "type")]
    pub variant_type: String,
    pub value: String,
    #[serde(default)]
    pub price_modifier: Option<f64>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Seller product upload assembled field-by-field from a multipart form.
/// Scalar fields arrive as text parts; images and documents as file parts.
#[derive(Debug, Default)]
pub struct ProductUpload {
    pub product_name: Option<String>,
    pub brand_name: Option<String>,
    pub product_category: Option<String>,
    pub sub_category: Option<String>,
    pub product_description: Option<String>,
    pub long_description: Option<String>,
    pub key_features: Option<String>,
    pub mrp: Option<f64>,
    pub selling_price: Option<f64>,
    pub product_price: Option<f64>,
    pub discount_percent: Option<f64>,
    pub gst_included: Option<bool>,
    pub minimum_order_quantity: Option<i32>,
    pub available_quantity: Option<i32>,
    pub sku_id: Option<String>,
    pub stock_availability: Option<String>,
    pub specifications: Option<String>,
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
    pub compliance_certificates: Option<String>,
    pub return_policy: Option<String>,
    pub replacement_available: Option<bool>,
    pub warranty_details: Option<String>,
    pub variants: Option<String>,
    pub unique_product_id: Option<String>,
    pub image_types: Option<String>,
    pub document_types: Option<String>,
    pub images: Vec<UploadedFile>,
    pub documents: Vec<UploadedFile>,
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid value for field {name}")))
}

impl ProductUpload {
    /// Route a text part into the matching field. Unknown field names are
    /// ignored, matching lenient form binding.
    pub fn set_text_field(&mut self, name: &str, value: String) -> AppResult<()> {
        if value.trim().is_empty() {
            return Ok(());
        }
        match name {
            "productName" => self.product_name = Some(value),
            "brandName" => self.brand_name = Some(value),
            "productCategory" => self.product_category = Some(value),
            "subCategory" => self.sub_category = Some(value),
            "productDescription" => self.product_description = Some(value),
            "longDescription" => self.long_description = Some(value),
            "keyFeatures" => self.key_features = Some(value),
            "mrp" => self.mrp = Some(parse_value(name, &value)?),
            "sellingPrice" => self.selling_price = Some(parse_value(name, &value)?),
            "productPrice" => self.product_price = Some(parse_value(name, &value)?),
            "discountPercent" => self.discount_percent = Some(parse_value(name, &value)?),
            "gstIncluded" => self.gst_included = Some(parse_value(name, &value)?),
            "minimumOrderQuantity" => {
                self.minimum_order_quantity = Some(parse_value(name, &value)?)
            }
            "availableQuantity" => self.available_quantity = Some(parse_value(name, &value)?),
            "skuId" => self.sku_id = Some(value),
            "stockAvailability" => self.stock_availability = Some(value),
            "specifications" => self.specifications = Some(value),
            "packageWeight" => self.package_weight = Some(parse_value(name, &value)?),
            "packageLength" => self.package_length = Some(parse_value(name, &value)?),
            "packageWidth" => self.package_width = Some(parse_value(name, &value)?),
            "packageHeight" => self.package_height = Some(parse_value(name, &value)?),
            "pickupAddress" => self.pickup_address = Some(value),
            "deliveryMethod" => self.delivery_method = Some(value),
            "gstNumber" => self.gst_number = Some(value),
            "hsnCode" => self.hsn_code = Some(value),
            "invoiceRequired" => self.invoice_required = Some(parse_value(name, &value)?),
            "brandAuthorized" => self.brand_authorized = Some(parse_value(name, &value)?),
            "trademarkVerified" => self.trademark_verified = Some(parse_value(name, &value)?),
            "complianceCertificates" => self.compliance_certificates = Some(value),
            "returnPolicy" => self.return_policy = Some(value),
            "replacementAvailable" => {
                self.replacement_available = Some(parse_value(name, &value)?)
            }
            "warrantyDetails" => self.warranty_details = Some(value),
            "variants" => self.variants = Some(value),
            "uniqueProductId" => self.unique_product_id = Some(value),
            "imageTypes" => self.image_types = Some(value),
            "documentTypes" => self.document_types = Some(value),
            other => {
                tracing::debug!(field = other, "ignoring unknown product upload field");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fields_are_routed_and_parsed() {
        let mut upload = ProductUpload::default();
        upload
            .set_text_field("productName", "Steel Bottle".into())
            .unwrap();
        upload.set_text_field("sellingPrice", "499.0".into()).unwrap();
        upload.set_text_field("availableQuantity", "25".into()).unwrap();
        upload.set_text_field("gstIncluded", "true".into()).unwrap();

        assert_eq!(upload.product_name.as_deref(), Some("Steel Bottle"));
        assert_eq!(upload.selling_price, Some(499.0));
        assert_eq!(upload.available_quantity, Some(25));
        assert_eq!(upload.gst_included, Some(true));
    }

    #[test]
    fn bad_numeric_field_is_a_bad_request() {
        let mut upload = ProductUpload::default();
        let err = upload
            .set_text_field("mrp", "not-a-number".into())
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("mrp")));
    }

    #[test]
    fn blank_and_unknown_fields_are_ignored() {
        let mut upload = ProductUpload::default();
        upload.set_text_field("mrp", "   ".into()).unwrap();
        upload.set_text_field("noSuchField", "x".into()).unwrap();
        assert_eq!(upload.mrp, None);
    }
}
