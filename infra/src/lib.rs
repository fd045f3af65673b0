//! # DriveShare Infrastructure
//!
//! Concrete implementations of the core's external interfaces:
//! - MySQL repositories for bookings and cars (SQLx)
//! - Stripe payment gateway with webhook signature verification

pub mod database;
pub mod payment;

use thiserror::Error;

/// Errors raised while constructing infrastructure components
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub use database::connection::DatabasePool;
pub use database::mysql::{MySqlBookingRepository, MySqlCarRepository};
pub use payment::StripeGateway;
