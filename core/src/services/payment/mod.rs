//! Payment reconciliation module
//!
//! This module applies external payment outcomes to booking state. The
//! payment processor itself sits behind the [`PaymentProvider`] trait; the
//! core never talks to its API directly and never trusts an inbound event
//! before the provider's signature verification primitive has accepted it.

mod provider;
mod service;

#[cfg(test)]
mod tests;

pub use provider::{
    IntentStatus, PaymentEvent, PaymentIntent, PaymentOutcome, PaymentProvider,
};
pub use service::PaymentService;
