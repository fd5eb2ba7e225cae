use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub mail_from: String,
    pub gateway_base_url: String,
    pub gateway_key_id: String,
    pub gateway_key_secret: String,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_port = env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(587);
        let smtp_username = env::var("SMTP_USERNAME").unwrap_or_default();
        let smtp_password = env::var("SMTP_PASSWORD").unwrap_or_default();
        let mail_from =
            env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@bazaar.local".to_string());

        let gateway_base_url = env::var("PAYMENT_GATEWAY_URL")
            .unwrap_or_else(|_| "https://api.razorpay.com".to_string());
        let gateway_key_id = env::var("PAYMENT_KEY_ID").unwrap_or_default();
        let gateway_key_secret = env::var("PAYMENT_KEY_SECRET").unwrap_or_default();

        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH").unwrap_or_default();

        let cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            host,
            port,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            mail_from,
            gateway_base_url,
            gateway_key_id,
            gateway_key_secret,
            admin_username,
            admin_password_hash,
            cors_origins,
        })
    }
}
