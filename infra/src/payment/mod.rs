//! Payment processor integration.

pub mod signature;
pub mod stripe;

pub use stripe::StripeGateway;
