mod common;

use bazaar_api::{error::AppError, services::cart_service};
use common::{auth_user, create_product, create_verified_user, setup_state};

// Adding the same product twice merges into one row with summed quantity.
#[tokio::test]
async fn cart_add_is_idempotent_per_product() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;

    let user = create_verified_user(&state, "cart-user").await?;
    let product = create_product(&state, None, "Cart Widget", "Gadgets", 250.0).await?;
    let auth = auth_user(user.id);

    cart_service::add_to_cart(&state, &auth, product.id, 2).await?;
    cart_service::add_to_cart(&state, &auth, product.id, 3).await?;

    let cart = cart_service::get_cart(&state, &auth).await?.data.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 5);
    assert_eq!(cart.items[0].subtotal, 1250.0);
    assert_eq!(cart.total, 1250.0);

    Ok(())
}

#[tokio::test]
async fn cart_update_sets_and_zero_removes() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;

    let user = create_verified_user(&state, "cart-update").await?;
    let product = create_product(&state, None, "Adjustable Widget", "Gadgets", 100.0).await?;
    let auth = auth_user(user.id);

    cart_service::add_to_cart(&state, &auth, product.id, 4).await?;
    cart_service::update_quantity(&state, &auth, product.id, 2).await?;

    let cart = cart_service::get_cart(&state, &auth).await?.data.unwrap();
    assert_eq!(cart.items[0].quantity, 2);

    cart_service::update_quantity(&state, &auth, product.id, 0).await?;
    let cart = cart_service::get_cart(&state, &auth).await?.data.unwrap();
    assert!(cart.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn cart_rejects_bad_input() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;

    let user = create_verified_user(&state, "cart-bad").await?;
    let product = create_product(&state, None, "Unwanted Widget", "Gadgets", 10.0).await?;
    let auth = auth_user(user.id);

    let err = cart_service::add_to_cart(&state, &auth, product.id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)), "{err:?}");

    let err = cart_service::add_to_cart(&state, &auth, i32::MAX, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound), "{err:?}");

    let err = cart_service::remove_from_cart(&state, &auth, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound), "{err:?}");

    Ok(())
}
