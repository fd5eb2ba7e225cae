#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};

use bazaar_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    email::Mailer,
    entity::{products, sellers, users},
    gateway::{GatewayOrder, PaymentGateway},
    state::AppState,
};

/// Capturing mail double: nothing leaves the process, every message is
/// readable by the test.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

impl RecordingMailer {
    /// Pull the OTP code out of the most recent message to `to`.
    pub fn last_otp_for(&self, to: &str) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let mail = sent.iter().rev().find(|m| m.to == to)?;
        let tail = mail.body.split("is: ").nth(1)?;
        Some(tail.chars().take(6).collect())
    }
}

/// Mail double simulating a flaky provider.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), String> {
        Err("smtp unavailable".to_string())
    }
}

pub struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder, String> {
        Ok(GatewayOrder {
            id: "order_stub_1".to_string(),
            amount,
            currency: currency.to_string(),
        })
    }
}

pub fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}

pub fn test_config(database_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        smtp_host: "localhost".to_string(),
        smtp_port: 2525,
        smtp_username: String::new(),
        smtp_password: String::new(),
        mail_from: "noreply@test.local".to_string(),
        gateway_base_url: "http://localhost:0".to_string(),
        gateway_key_id: "key_test".to_string(),
        gateway_key_secret: "gateway-test-secret".to_string(),
        admin_username: "admin".to_string(),
        admin_password_hash: String::new(),
        cors_origins: Vec::new(),
    }
}

pub async fn setup_state_with(
    database_url: &str,
    mailer: Arc<dyn Mailer>,
) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&pool).await?;

    Ok(AppState {
        pool,
        orm,
        config: test_config(database_url),
        mailer,
        gateway: Arc::new(StubGateway),
    })
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<(AppState, Arc<RecordingMailer>)> {
    let mailer = Arc::new(RecordingMailer::default());
    let state = setup_state_with(database_url, mailer.clone()).await?;
    Ok((state, mailer))
}

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique suffix so concurrently running test binaries never collide on
/// usernames or emails in the shared database.
pub fn unique(tag: &str) -> String {
    format!(
        "{tag}-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

pub async fn create_verified_user(state: &AppState, tag: &str) -> anyhow::Result<users::Model> {
    let username = unique(tag);
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(username.clone()),
        password_hash: Set("unused".to_string()),
        email: Set(Some(format!("{username}@example.com"))),
        email_verified: Set(true),
        phone_number: Set(None),
        alternate_number: Set(None),
        address: Set(Some("12 Test Lane".to_string())),
        photo: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(user)
}

pub async fn create_seller(state: &AppState, tag: &str) -> anyhow::Result<sellers::Model> {
    let username = unique(tag);
    let seller = sellers::ActiveModel {
        id: NotSet,
        username: Set(username.clone()),
        password_hash: Set("unused".to_string()),
        email: Set(format!("{username}@example.com")),
        email_verified: Set(true),
        whatsapp_number: Set(None),
        business_email: Set(None),
        gst_number: Set(Some("29ABCDE1234F2Z5".to_string())),
        photo: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(seller)
}

pub async fn create_product(
    state: &AppState,
    seller_id: Option<i32>,
    name: &str,
    category: &str,
    price: f64,
) -> anyhow::Result<products::Model> {
    let product = products::ActiveModel {
        id: NotSet,
        seller_id: Set(seller_id),
        name: Set(name.to_string()),
        category: Set(Some(category.to_string())),
        description: Set(Some(format!("{name} for tests"))),
        selling_price: Set(Some(price)),
        price: Set(price),
        available_quantity: Set(Some(50)),
        stock_availability: Set(Some("ready".to_string())),
        brand_name: Set(None),
        sub_category: Set(None),
        long_description: Set(None),
        key_features: Set(None),
        mrp: Set(None),
        discount_percent: Set(None),
        gst_included: Set(None),
        minimum_order_quantity: Set(None),
        sku_id: Set(None),
        package_weight: Set(None),
        package_length: Set(None),
        package_width: Set(None),
        package_height: Set(None),
        pickup_address: Set(None),
        delivery_method: Set(None),
        gst_number: Set(None),
        hsn_code: Set(None),
        invoice_required: Set(None),
        brand_authorized: Set(None),
        trademark_verified: Set(None),
        compliance_certificates: Set(None),
        return_policy: Set(None),
        replacement_available: Set(None),
        warranty_details: Set(None),
        unique_product_id: Set(Some(unique("PROD"))),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

pub fn auth_user(id: i32) -> bazaar_api::middleware::auth::AuthUser {
    bazaar_api::middleware::auth::AuthUser {
        subject: id.to_string(),
        role: bazaar_api::middleware::auth::Role::User,
    }
}
