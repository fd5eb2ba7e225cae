use std::collections::BTreeMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::OrmConn,
    dto::products::{ProductList, ProductUpload, VariantUpload},
    entity::{
        product_documents::ActiveModel as DocumentActive,
        product_images::{ActiveModel as ImageActive, Column as ImageCol, Entity as ProductImages},
        product_specifications::{
            ActiveModel as SpecActive, Column as SpecCol, Entity as ProductSpecifications,
        },
        product_variants::{
            ActiveModel as VariantActive, Column as VariantCol, Entity as ProductVariants,
        },
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products, Model as ProductModel},
        sellers::Model as SellerModel,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, Variant},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    validation::validate_product_image,
};

#[derive(FromQueryResult)]
struct ImageMeta {
    id: i32,
    display_order: i32,
}

/// Assemble the API view of a product: child rows are normalized tables,
/// image URLs point at the binary passthrough endpoint.
pub(crate) async fn load_view(orm: &OrmConn, model: ProductModel) -> AppResult<Product> {
    let mut images = ProductImages::find()
        .select_only()
        .column(ImageCol::Id)
        .column(ImageCol::DisplayOrder)
        .filter(ImageCol::ProductId.eq(model.id))
        .into_model::<ImageMeta>()
        .all(orm)
        .await?;
    images.sort_by_key(|img| img.display_order);

    let image_urls: Vec<String> = images
        .iter()
        .map(|img| format!("/product-image/{}/{}", model.id, img.id))
        .collect();
    let primary_image_url = image_urls.first().cloned();

    let specs = ProductSpecifications::find()
        .filter(SpecCol::ProductId.eq(model.id))
        .order_by_asc(SpecCol::DisplayOrder)
        .all(orm)
        .await?;
    let specifications = if specs.is_empty() {
        None
    } else {
        Some(
            specs
                .into_iter()
                .map(|s| (s.spec_key, s.spec_value))
                .collect::<BTreeMap<_, _>>(),
        )
    };

    let variant_rows = ProductVariants::find()
        .filter(VariantCol::ProductId.eq(model.id))
        .all(orm)
        .await?;
    let variants = if variant_rows.is_empty() {
        None
    } else {
        Some(
            variant_rows
                .into_iter()
                .map(|v| Variant {
                    id: v.id,
                    variant_type: v.variant_type,
                    value: v.variant_value,
                    price_modifier: v.price_modifier,
                    stock: v.stock_quantity,
                    sku: v.sku,
                    is_available: v.is_available,
                })
                .collect(),
        )
    };

    let compliance_certificates = model
        .compliance_certificates
        .as_deref()
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok());

    Ok(Product {
        id: model.id,
        seller_id: model.seller_id,
        name: model.name,
        brand_name: model.brand_name,
        category: model.category,
        sub_category: model.sub_category,
        description: model.description,
        long_description: model.long_description,
        key_features: model.key_features,
        mrp: model.mrp,
        selling_price: model.selling_price.unwrap_or(model.price),
        price: model.price,
        discount_percent: model.discount_percent,
        gst_included: model.gst_included,
        minimum_order_quantity: model.minimum_order_quantity,
        available_quantity: model.available_quantity,
        sku_id: model.sku_id,
        stock_availability: model.stock_availability,
        package_weight: model.package_weight,
        package_length: model.package_length,
        package_width: model.package_width,
        package_height: model.package_height,
        pickup_address: model.pickup_address,
        delivery_method: model.delivery_method,
        gst_number: model.gst_number,
        hsn_code: model.hsn_code,
        invoice_required: model.invoice_required,
        brand_authorized: model.brand_authorized,
        trademark_verified: model.trademark_verified,
        compliance_certificates,
        return_policy: model.return_policy,
        replacement_available: model.replacement_available,
        warranty_details: model.warranty_details,
        unique_product_id: model.unique_product_id,
        image_urls,
        primary_image_url,
        specifications,
        variants,
    })
}

pub(crate) async fn load_views(
    orm: &OrmConn,
    models: Vec<ProductModel>,
) -> AppResult<Vec<Product>> {
    let mut views = Vec::with_capacity(models.len());
    for model in models {
        views.push(load_view(orm, model).await?);
    }
    Ok(views)
}

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = Products::find().order_by_asc(ProdCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = load_views(&state.orm, models).await?;
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let model = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let view = load_view(&state.orm, model).await?;
    Ok(ApiResponse::success("Product", view, None))
}

pub async fn products_by_category(
    state: &AppState,
    category: &str,
) -> AppResult<ApiResponse<ProductList>> {
    let pattern = format!("%{category}%");
    let models = Products::find()
        .filter(Expr::col(ProdCol::Category).ilike(pattern))
        .order_by_asc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let items = load_views(&state.orm, models).await?;
    Ok(ApiResponse::success("Products", ProductList { items }, None))
}

pub async fn search_products(
    state: &AppState,
    query: &str,
) -> AppResult<ApiResponse<ProductList>> {
    let pattern = format!("%{query}%");
    let condition = Condition::any()
        .add(Expr::col(ProdCol::Name).ilike(pattern.clone()))
        .add(Expr::col(ProdCol::Description).ilike(pattern));

    let models = Products::find()
        .filter(condition)
        .order_by_asc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let items = load_views(&state.orm, models).await?;
    Ok(ApiResponse::success("Products", ProductList { items }, None))
}

pub async fn distinct_categories(orm: &OrmConn) -> AppResult<Vec<String>> {
    let rows: Vec<Option<String>> = Products::find()
        .select_only()
        .column(ProdCol::Category)
        .distinct()
        .into_tuple()
        .all(orm)
        .await?;

    let mut categories: Vec<String> = rows
        .into_iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort();
    Ok(categories)
}

/// Primary image payload for the passthrough endpoint: the row flagged
/// primary, or the first by display order when none is flagged.
pub async fn primary_image(
    orm: &OrmConn,
    product_id: i32,
) -> AppResult<Option<(Vec<u8>, Option<String>)>> {
    let image = ProductImages::find()
        .filter(ImageCol::ProductId.eq(product_id))
        .order_by_desc(ImageCol::IsPrimary)
        .order_by_asc(ImageCol::DisplayOrder)
        .one(orm)
        .await?;
    Ok(image.map(|img| (img.image_data, img.image_name)))
}

pub async fn image_by_id(
    orm: &OrmConn,
    product_id: i32,
    image_id: i32,
) -> AppResult<Option<(Vec<u8>, Option<String>)>> {
    let image = ProductImages::find_by_id(image_id).one(orm).await?;
    Ok(image
        .filter(|img| img.product_id == product_id && !img.image_data.is_empty())
        .map(|img| (img.image_data, img.image_name)))
}

fn parse_type_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    // JSON array first, comma-separated fallback.
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list;
    }
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalized_image_name(file_name: &str) -> String {
    let lower = file_name.to_lowercase();
    let ext = if lower.ends_with(".jpeg") { ".jpeg" } else { ".jpg" };
    format!("{}{}", Uuid::new_v4(), ext)
}

/// Create a product with its images, specifications, variants and documents
/// in one transaction.
pub async fn create_product(
    state: &AppState,
    auth: &AuthUser,
    seller: &SellerModel,
    upload: ProductUpload,
) -> AppResult<ApiResponse<Product>> {
    let name = upload
        .product_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Product name is required".to_string()))?;

    // Validate every image before any row is written.
    for image in &upload.images {
        validate_product_image(image)?;
    }

    let selling_price = upload
        .selling_price
        .or(upload.product_price.filter(|p| *p != 0.0))
        .unwrap_or(0.0);

    let unique_product_id = upload
        .unique_product_id
        .clone()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| {
            let suffix = Uuid::new_v4().simple().to_string();
            format!("PROD-{}", suffix[..8].to_uppercase())
        });

    let txn = state.orm.begin().await?;

    let product = ProductActive {
        id: NotSet,
        seller_id: Set(Some(seller.id)),
        name: Set(name),
        brand_name: Set(upload.brand_name.clone()),
        category: Set(upload.product_category.clone()),
        sub_category: Set(upload.sub_category.clone()),
        description: Set(upload.product_description.clone()),
        long_description: Set(upload.long_description.clone()),
        key_features: Set(upload.key_features.clone()),
        mrp: Set(upload.mrp),
        selling_price: Set(Some(selling_price)),
        // The legacy column mirrors the selling price so old clients keep
        // reading a value.
        price: Set(selling_price),
        discount_percent: Set(upload.discount_percent),
        gst_included: Set(upload.gst_included),
        minimum_order_quantity: Set(upload.minimum_order_quantity),
        available_quantity: Set(upload.available_quantity),
        sku_id: Set(upload.sku_id.clone()),
        stock_availability: Set(upload.stock_availability.clone()),
        package_weight: Set(upload.package_weight),
        package_length: Set(upload.package_length),
        package_width: Set(upload.package_width),
        package_height: Set(upload.package_height),
        pickup_address: Set(upload.pickup_address.clone()),
        delivery_method: Set(upload.delivery_method.clone()),
        gst_number: Set(upload.gst_number.clone().or_else(|| seller.gst_number.clone())),
        hsn_code: Set(upload.hsn_code.clone()),
        invoice_required: Set(upload.invoice_required),
        brand_authorized: Set(upload.brand_authorized),
        trademark_verified: Set(upload.trademark_verified),
        compliance_certificates: Set(upload.compliance_certificates.clone()),
        return_policy: Set(upload.return_policy.clone()),
        replacement_available: Set(upload.replacement_available),
        warranty_details: Set(upload.warranty_details.clone()),
        unique_product_id: Set(Some(unique_product_id)),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let image_types = parse_type_list(upload.image_types.as_deref());
    for (i, file) in upload.images.iter().enumerate() {
        ImageActive {
            id: NotSet,
            product_id: Set(product.id),
            image_data: Set(file.data.clone()),
            image_name: Set(Some(normalized_image_name(&file.file_name))),
            image_type: Set(image_types.get(i).cloned()),
            display_order: Set(i as i32),
            is_primary: Set(i == 0),
        }
        .insert(&txn)
        .await?;
    }

    if let Some(raw) = upload.specifications.as_deref().filter(|s| !s.trim().is_empty()) {
        match serde_json::from_str::<BTreeMap<String, String>>(raw) {
            Ok(specs) => {
                for (order, (key, value)) in specs.into_iter().enumerate() {
                    SpecActive {
                        id: NotSet,
                        product_id: Set(product.id),
                        spec_key: Set(key),
                        spec_value: Set(value),
                        spec_group: Set(Some("General".to_string())),
                        display_order: Set(order as i32),
                    }
                    .insert(&txn)
                    .await?;
                }
            }
            Err(err) => {
                tracing::warn!(product_id = product.id, error = %err, "unparseable specifications, skipping");
            }
        }
    }

    if let Some(raw) = upload.variants.as_deref().filter(|s| !s.trim().is_empty()) {
        match serde_json::from_str::<Vec<VariantUpload>>(raw) {
            Ok(variants) => {
                for variant in variants {
                    VariantActive {
                        id: NotSet,
                        product_id: Set(product.id),
                        variant_type: Set(variant.variant_type),
                        variant_value: Set(variant.value),
                        price_modifier: Set(variant.price_modifier.unwrap_or(0.0)),
                        stock_quantity: Set(variant.stock.unwrap_or(0)),
                        sku: Set(variant.sku),
                        is_available: Set(variant.is_available.unwrap_or(true)),
                    }
                    .insert(&txn)
                    .await?;
                }
            }
            Err(err) => {
                tracing::warn!(product_id = product.id, error = %err, "unparseable variants, skipping");
            }
        }
    }

    let document_types = parse_type_list(upload.document_types.as_deref());
    for (i, file) in upload.documents.iter().enumerate() {
        if file.data.is_empty() {
            continue;
        }
        DocumentActive {
            id: NotSet,
            product_id: Set(product.id),
            document_data: Set(file.data.clone()),
            document_name: Set(Some(file.file_name.clone())),
            document_type: Set(Some(
                document_types
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| "other".to_string()),
            )),
            mime_type: Set(file.content_type.clone()),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        auth.account_id().ok(),
        "product_upload",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "seller_id": seller.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let view = load_view(&state.orm, product).await?;
    Ok(ApiResponse::success(
        "Product uploaded successfully",
        view,
        Some(Meta::empty()),
    ))
}

pub async fn seller_products(
    state: &AppState,
    seller_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    let models = Products::find()
        .filter(ProdCol::SellerId.eq(seller_id))
        .order_by_desc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let items = load_views(&state.orm, models).await?;
    Ok(ApiResponse::success("Products", ProductList { items }, None))
}
