//! Configuration types for the DriveShare server

mod database;
mod payment;
mod server;

pub use database::DatabaseConfig;
pub use payment::PaymentConfig;
pub use server::ServerConfig;

/// Top-level application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Assemble the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            payment: PaymentConfig::from_env(),
        }
    }
}
