use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

/// An order reference minted by the external payment processor for a pending
/// charge, distinct from this system's orders rows.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a gateway-side order for `amount` minor currency units.
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, String>;
}

/// REST client for the hosted gateway, authenticated with the key pair.
pub struct RestPaymentGateway {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

impl RestPaymentGateway {
    pub fn new(base_url: &str, key_id: &str, key_secret: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RestPaymentGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, String> {
        let url = format!("{}/v1/orders", self.base_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&CreateOrderBody {
                amount,
                currency,
                receipt,
            })
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("gateway returned {status}: {body}"));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| e.to_string())
    }
}

/// Check the client-submitted payment signature against
/// `HMAC-SHA256(secret, "{order_id}|{payment_id}")`, hex-encoded.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{order_id}|{payment_id}").as_bytes());

    let Ok(submitted) = hex::decode(signature) else {
        return false;
    };
    mac.verify_slice(&submitted).is_ok()
}

/// Compute the hex signature the gateway would produce for a payment.
pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> Option<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genuine_signature_verifies() {
        let sig = sign_payment("shhh", "order_123", "pay_456").unwrap();
        assert!(verify_signature("shhh", "order_123", "pay_456", &sig));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let sig = sign_payment("shhh", "order_123", "pay_456").unwrap();
        assert!(!verify_signature("shhh", "order_123", "pay_999", &sig));
        assert!(!verify_signature("other-secret", "order_123", "pay_456", &sig));
    }

    #[test]
    fn garbage_signature_is_rejected() {
        assert!(!verify_signature("shhh", "order_123", "pay_456", "not-hex"));
        assert!(!verify_signature("shhh", "order_123", "pay_456", ""));
    }
}
