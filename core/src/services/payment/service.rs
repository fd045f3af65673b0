//! Payment reconciliation service implementation

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, PaymentStatus};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::BookingRepository;

use super::provider::{IntentStatus, PaymentIntent, PaymentOutcome, PaymentProvider};

/// Service reconciling external payment outcomes against booking state
///
/// Reconciliation is idempotent per payment intent reference, so it is safe
/// under the processor's at-least-once event delivery.
pub struct PaymentService<B, P>
where
    B: BookingRepository,
    P: PaymentProvider,
{
    /// Booking repository for persistence
    booking_repository: Arc<B>,
    /// External payment processor
    provider: Arc<P>,
}

impl<B, P> PaymentService<B, P>
where
    B: BookingRepository,
    P: PaymentProvider,
{
    /// Create a new payment service
    pub fn new(booking_repository: Arc<B>, provider: Arc<P>) -> Self {
        Self {
            booking_repository,
            provider,
        }
    }

    /// Create a payment intent for a booking
    ///
    /// The processor's intent id is persisted on the booking so later
    /// events can be reconciled back to it.
    ///
    /// # Returns
    /// The intent handle including the client secret for the frontend.
    pub async fn create_intent(
        &self,
        booking_id: Uuid,
        amount: Decimal,
    ) -> DomainResult<PaymentIntent> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::invalid_input("amount must be positive"));
        }

        let mut booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking"))?;

        // Processor charges are denominated in minor units.
        let amount_minor = (amount * Decimal::from(100))
            .round()
            .to_i64()
            .ok_or_else(|| DomainError::invalid_input("amount out of range"))?;

        let intent = self.provider.create_intent(amount_minor, booking_id).await?;

        booking.set_payment_intent(&intent.intent_id);
        self.booking_repository.update(booking).await?;

        info!(booking_id = %booking_id, "payment intent created");
        Ok(intent)
    }

    /// Confirm a payment by polling the processor
    ///
    /// Used by clients that confirm a charge synchronously instead of
    /// waiting for the webhook. A not-yet-succeeded intent is a `Conflict`;
    /// the processor will still deliver the final outcome via webhook.
    pub async fn confirm_payment(&self, intent_id: &str) -> DomainResult<Booking> {
        match self.provider.retrieve_intent(intent_id).await? {
            IntentStatus::Succeeded => self.reconcile(intent_id, PaymentOutcome::Succeeded).await,
            IntentStatus::Processing | IntentStatus::Failed => {
                Err(DomainError::conflict("payment not completed"))
            }
        }
    }

    /// Handle an inbound webhook event
    ///
    /// The payload is verified through the provider's signature primitive
    /// before anything is trusted. Verification or parse failure surfaces
    /// as `InvalidWebhook` and mutates no booking; the boundary layer maps
    /// it to a rejection so the processor retries delivery.
    pub async fn handle_webhook(&self, payload: &[u8], signature: &str) -> DomainResult<Booking> {
        let event = self.provider.verify_event(payload, signature)?;
        self.reconcile(&event.intent_id, event.outcome).await
    }

    /// Apply a payment outcome to the booking holding the intent reference
    ///
    /// Idempotent for `Succeeded`: applying the same succeeded event twice
    /// leaves the booking paid-and-active and returns success. `Failed`
    /// marks the payment failed but keeps the booking pending so the renter
    /// can retry.
    pub async fn reconcile(
        &self,
        intent_id: &str,
        outcome: PaymentOutcome,
    ) -> DomainResult<Booking> {
        let mut booking = self
            .booking_repository
            .find_by_payment_intent(intent_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking"))?;

        match outcome {
            PaymentOutcome::Succeeded => {
                if !booking.apply_payment_succeeded()? {
                    // Duplicate delivery of an already-applied event.
                    info!(booking_id = %booking.id, "payment already reconciled");
                    return Ok(booking);
                }
            }
            PaymentOutcome::Failed => {
                if booking.payment_status == PaymentStatus::Failed {
                    return Ok(booking);
                }
                warn!(booking_id = %booking.id, "payment failed");
                booking.apply_payment_failed();
            }
        }

        // payment_status and status are written back in one update; they
        // are never persisted independently.
        let updated = self.booking_repository.update(booking).await?;
        info!(booking_id = %updated.id, "payment outcome reconciled");
        Ok(updated)
    }
}
