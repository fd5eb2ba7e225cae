mod common;

use bazaar_api::{error::AppError, services::wishlist_service};
use common::{auth_user, create_product, create_verified_user, setup_state};

#[tokio::test]
async fn wishlist_add_check_remove() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;

    let user = create_verified_user(&state, "wisher").await?;
    let product = create_product(&state, None, "Wished Widget", "Gadgets", 75.0).await?;
    let auth = auth_user(user.id);

    let absent = wishlist_service::check_wishlist(&state, &auth, product.id)
        .await?
        .data
        .unwrap();
    assert!(!absent);

    wishlist_service::add_to_wishlist(&state, &auth, product.id).await?;

    // A second add is rejected rather than duplicated.
    let dup = wishlist_service::add_to_wishlist(&state, &auth, product.id)
        .await
        .unwrap_err();
    assert!(
        matches!(dup, AppError::BadRequest(ref msg) if msg.contains("already in wishlist")),
        "{dup:?}"
    );

    let items = wishlist_service::get_wishlist(&state, &auth).await?.data.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product.id, product.id);

    wishlist_service::remove_from_wishlist(&state, &auth, product.id).await?;
    let err = wishlist_service::remove_from_wishlist(&state, &auth, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound), "{err:?}");

    Ok(())
}
