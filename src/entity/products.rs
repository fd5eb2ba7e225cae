use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub selling_price: Option<f64>,
    /// Legacy price column; mirrors `selling_price` whenever that is set.
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
    pub compliance_certificates: Option<String>,
    pub return_policy: Option<String>,
    pub replacement_available: Option<bool>,
    pub warranty_details: Option<String>,
    pub unique_product_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sellers::Entity",
        from = "Column::SellerId",
        to = "super::sellers::Column::Id"
    )]
    Seller,
    #[sea_orm(has_many = "super::product_images::Entity")]
    Images,
    #[sea_orm(has_many = "super::product_specifications::Entity")]
    Specifications,
    #[sea_orm(has_many = "super::product_variants::Entity")]
    Variants,
    #[sea_orm(has_many = "super::product_documents::Entity")]
    Documents,
    #[sea_orm(has_many = "super::cart_items::Entity")]
    CartItems,
    #[sea_orm(has_many = "super::wishlist_items::Entity")]
    WishlistItems,
}

impl Related<super::sellers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl Related<super::product_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::product_specifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Specifications.def()
    }
}

impl Related<super::product_variants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl Related<super::product_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
