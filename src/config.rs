use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session_base_url: String,
    pub payment: PaymentConfig,
}

/// Tuning for the simulated payment gateway.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub charge_delay: Duration,
    pub approval_rate: f64,
    pub verify_rate: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            charge_delay: Duration::from_millis(2000),
            approval_rate: 0.9,
            verify_rate: 0.95,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let session_base_url = env::var("SESSION_BASE_URL")
            .unwrap_or_else(|_| "https://session.inr99.academy".to_string());

        let defaults = PaymentConfig::default();
        let payment = PaymentConfig {
            charge_delay: env::var("PAYMENT_GATEWAY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.charge_delay),
            approval_rate: parse_rate("PAYMENT_APPROVAL_RATE").unwrap_or(defaults.approval_rate),
            verify_rate: parse_rate("PAYMENT_VERIFY_RATE").unwrap_or(defaults.verify_rate),
        };

        Ok(Self {
            port,
            database_url,
            host,
            session_base_url,
            payment,
        })
    }
}

fn parse_rate(key: &str) -> Option<f64> {
    env::var(key).ok().as_deref().and_then(rate_from_str)
}

/// Accepts a ratio in `[0, 1]`.
fn rate_from_str(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| (0.0..=1.0).contains(r))
}
