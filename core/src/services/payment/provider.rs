//! Payment provider trait and wire types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainResult;

/// A freshly created payment intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor-assigned intent identifier
    pub intent_id: String,
    /// Client secret the frontend uses to confirm the charge
    pub client_secret: String,
}

/// Current state of an intent as reported by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentStatus {
    Succeeded,
    Processing,
    Failed,
}

/// Final outcome carried by a verified payment event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
    Failed,
}

/// A payment event that passed signature verification
#[derive(Debug, Clone)]
pub struct PaymentEvent {
    /// Intent the event refers to
    pub intent_id: String,
    /// Outcome to reconcile against booking state
    pub outcome: PaymentOutcome,
}

/// Interface to the external payment processor
///
/// Implementations live in the infrastructure layer. `verify_event` is the
/// authenticity primitive: it must reject unverifiable or unparseable
/// payloads with `DomainError::InvalidWebhook` so nothing untrusted
/// reaches reconciliation.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for the given amount
    ///
    /// # Arguments
    /// * `amount_minor` - Charge amount in minor currency units (cents)
    /// * `booking_id` - Attached as intent metadata for traceability
    async fn create_intent(
        &self,
        amount_minor: i64,
        booking_id: Uuid,
    ) -> DomainResult<PaymentIntent>;

    /// Fetch the current status of an intent
    async fn retrieve_intent(&self, intent_id: &str) -> DomainResult<IntentStatus>;

    /// Verify an inbound event's signature and parse it
    ///
    /// # Returns
    /// * `Ok(PaymentEvent)` - Authentic event with a supported outcome
    /// * `Err(DomainError::InvalidWebhook)` - Bad signature, unparseable
    ///   payload, or unsupported event type
    fn verify_event(&self, payload: &[u8], signature: &str) -> DomainResult<PaymentEvent>;
}
