mod common;

use bazaar_api::{
    dto::products::ProductUpload,
    entity::Products,
    error::AppError,
    middleware::auth::{AuthUser, Role},
    services::product_service,
    validation::UploadedFile,
};
use common::{create_seller, setup_state, unique};
use sea_orm::EntityTrait;

fn seller_auth(id: i32) -> AuthUser {
    AuthUser {
        subject: id.to_string(),
        role: Role::Seller,
    }
}

fn jpeg_file(name: &str) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        content_type: Some("image/jpeg".to_string()),
        data: vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0],
    }
}

// A listing created with only sellingPrice reads back with the legacy price
// mirroring it.
#[tokio::test]
async fn selling_price_mirrors_legacy_price() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let seller = create_seller(&state, "seller-mirror").await?;

    let mut upload = ProductUpload::default();
    upload.product_name = Some(unique("Bottle"));
    upload.product_category = Some("Kitchen".to_string());
    upload.selling_price = Some(499.0);
    upload.specifications = Some(r#"{"Capacity": "1L", "Material": "Steel"}"#.to_string());
    upload.variants =
        Some(r#"[{"type": "color", "value": "Blue", "priceModifier": 0, "stock": 10}]"#.to_string());
    upload.images.push(jpeg_file("front.jpg"));
    upload.images.push(jpeg_file("back.jpeg"));

    let created = product_service::create_product(&state, &seller_auth(seller.id), &seller, upload)
        .await?
        .data
        .unwrap();

    assert_eq!(created.price, 499.0);
    assert_eq!(created.selling_price, 499.0);

    let row = Products::find_by_id(created.id)
        .one(&state.orm)
        .await?
        .unwrap();
    assert_eq!(row.price, 499.0);
    assert_eq!(row.selling_price, Some(499.0));
    // The seller's GST number backfills the product when none is supplied.
    assert_eq!(row.gst_number, seller.gst_number);

    // Children landed in their normalized tables.
    let spec_map = created.specifications.unwrap();
    assert_eq!(spec_map.get("Capacity").map(String::as_str), Some("1L"));
    let variants = created.variants.unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].value, "Blue");

    // Two image URLs in display order, first one primary.
    assert_eq!(created.image_urls.len(), 2);
    assert_eq!(created.primary_image_url.as_deref(), created.image_urls.first().map(String::as_str));

    let primary = product_service::primary_image(&state.orm, created.id).await?;
    assert!(primary.is_some());

    Ok(())
}

#[tokio::test]
async fn upload_rejects_non_jpeg_image() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let seller = create_seller(&state, "seller-badimg").await?;

    let mut upload = ProductUpload::default();
    upload.product_name = Some(unique("Poster"));
    upload.images.push(UploadedFile {
        file_name: "art.png".to_string(),
        content_type: Some("image/jpeg".to_string()),
        data: vec![0u8; 64],
    });

    let err = product_service::create_product(&state, &seller_auth(seller.id), &seller, upload)
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::BadRequest(ref msg) if msg.contains("Only JPG and JPEG")),
        "{err:?}"
    );

    Ok(())
}

#[tokio::test]
async fn category_and_search_match_substrings_case_insensitively() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;

    let marker = unique("needle");
    let category = format!("Category-{marker}");
    common::create_product(&state, None, &format!("Lamp {marker}"), &category, 42.0).await?;

    let by_category = product_service::products_by_category(&state, &category.to_uppercase())
        .await?
        .data
        .unwrap();
    assert_eq!(by_category.items.len(), 1);

    let by_name = product_service::search_products(&state, &marker.to_uppercase())
        .await?
        .data
        .unwrap();
    assert!(by_name.items.iter().any(|p| p.name.contains(&marker)));

    let nothing = product_service::search_products(&state, &unique("absent"))
        .await?
        .data
        .unwrap();
    assert!(nothing.items.is_empty());

    Ok(())
}
