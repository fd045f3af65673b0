//! Payment processor configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the external payment processor (Stripe)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    /// Secret API key used for server-side calls
    pub secret_key: String,

    /// Webhook endpoint signing secret
    pub webhook_secret: String,

    /// Three-letter ISO currency code for charges
    pub currency: String,

    /// Accepted clock skew for webhook timestamps, in seconds
    pub webhook_tolerance_seconds: i64,

    /// HTTP timeout for processor calls, in seconds
    pub request_timeout: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            webhook_secret: String::new(),
            currency: String::from("usd"),
            webhook_tolerance_seconds: 300,
            request_timeout: 15,
        }
    }
}

impl PaymentConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_default(),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            ..Default::default()
        }
    }

    /// Whether the processor credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty() && !self.webhook_secret.is_empty()
    }
}
