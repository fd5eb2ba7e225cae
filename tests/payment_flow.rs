mod common;

use bazaar_api::{
    dto::payment::{CreateOrderRequest, PaymentSuccessRequest},
    error::AppError,
    gateway::sign_payment,
    services::payment_service,
};
use common::{auth_user, create_product, create_verified_user, setup_state};

fn success_payload(secret: &str, order_id: &str, payment_id: &str) -> PaymentSuccessRequest {
    PaymentSuccessRequest {
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        signature: sign_payment(secret, order_id, payment_id).unwrap(),
        amount: None,
        is_buy_now: None,
        product_id: None,
        quantity: None,
    }
}

// Gateway handoff mints an order reference; the success callback is only
// recorded when the signature checks out.
#[tokio::test]
async fn payment_records_only_signed_confirmations() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let secret = state.config.gateway_key_secret.clone();

    let user = create_verified_user(&state, "payer").await?;
    let auth = auth_user(user.id);

    let created = payment_service::create_order(&state, &auth, CreateOrderRequest { amount: 50_000 })
        .await?
        .data
        .unwrap();
    assert_eq!(created.id, "order_stub_1");
    assert_eq!(created.amount, 50_000);

    // Tampered signature: nothing is written.
    let mut forged = success_payload(&secret, &created.id, "pay_1");
    forged.signature = "deadbeef".to_string();
    forged.amount = Some(50_000);
    let err = payment_service::record_success(&state, &auth, forged)
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::BadRequest(ref msg) if msg.contains("signature")),
        "{err:?}"
    );
    let orders = payment_service::list_orders(&state, &auth).await?.data.unwrap();
    assert!(orders.items.is_empty());

    // Genuine signature: the cart total is taken from the caller.
    let mut payload = success_payload(&secret, &created.id, "pay_1");
    payload.amount = Some(50_000);
    payment_service::record_success(&state, &auth, payload).await?;

    let orders = payment_service::list_orders(&state, &auth).await?.data.unwrap();
    assert_eq!(orders.items.len(), 1);
    assert_eq!(orders.items[0].amount, 500.0);
    assert_eq!(orders.items[0].order_id, created.id);

    Ok(())
}

// Buy-now amounts are recomputed from the product row, not trusted from the
// client.
#[tokio::test]
async fn buy_now_amount_is_recomputed_server_side() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let secret = state.config.gateway_key_secret.clone();

    let user = create_verified_user(&state, "buyer").await?;
    let auth = auth_user(user.id);
    let product = create_product(&state, None, "Buy Now Widget", "Gadgets", 499.0).await?;

    let quote = payment_service::buy_now(&state, &auth, product.id, 2)
        .await?
        .data
        .unwrap();
    assert_eq!(quote.amount, 998.0);
    assert!(!quote.needs_address, "helper seeds an address");

    let mut payload = success_payload(&secret, "order_buynow", "pay_2");
    payload.is_buy_now = Some(true);
    payload.product_id = Some(product.id);
    payload.quantity = Some(2);
    // A lowballed client amount is ignored on the buy-now path.
    payload.amount = Some(1);
    payment_service::record_success(&state, &auth, payload).await?;

    let orders = payment_service::list_orders(&state, &auth).await?.data.unwrap();
    assert_eq!(orders.items.len(), 1);
    assert_eq!(orders.items[0].amount, 998.0);

    Ok(())
}
