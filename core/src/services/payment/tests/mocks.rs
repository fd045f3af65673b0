//! Mock payment provider for testing

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::services::payment::{
    IntentStatus, PaymentEvent, PaymentIntent, PaymentOutcome, PaymentProvider,
};

/// Scripted payment provider
///
/// `verify_event` treats the payload as `"<intent_id>:<succeeded|failed>"`
/// and accepts only the signature `"valid"`, which is enough to drive the
/// reconciliation paths without a real processor.
pub struct MockPaymentProvider {
    pub intents_created: AtomicUsize,
    pub retrieve_status: Mutex<IntentStatus>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self {
            intents_created: AtomicUsize::new(0),
            retrieve_status: Mutex::new(IntentStatus::Processing),
        }
    }

    pub fn set_retrieve_status(&self, status: IntentStatus) {
        *self.retrieve_status.lock().unwrap() = status;
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_intent(
        &self,
        _amount_minor: i64,
        booking_id: Uuid,
    ) -> DomainResult<PaymentIntent> {
        let n = self.intents_created.fetch_add(1, Ordering::SeqCst);
        Ok(PaymentIntent {
            intent_id: format!("pi_mock_{}_{}", booking_id.simple(), n),
            client_secret: format!("pi_mock_secret_{}", n),
        })
    }

    async fn retrieve_intent(&self, _intent_id: &str) -> DomainResult<IntentStatus> {
        Ok(*self.retrieve_status.lock().unwrap())
    }

    fn verify_event(&self, payload: &[u8], signature: &str) -> DomainResult<PaymentEvent> {
        if signature != "valid" {
            return Err(DomainError::InvalidWebhook {
                message: "signature verification failed".to_string(),
            });
        }
        let payload = std::str::from_utf8(payload).map_err(|_| DomainError::InvalidWebhook {
            message: "payload is not valid UTF-8".to_string(),
        })?;
        let (intent_id, outcome) =
            payload
                .split_once(':')
                .ok_or_else(|| DomainError::InvalidWebhook {
                    message: "malformed event payload".to_string(),
                })?;
        let outcome = match outcome {
            "succeeded" => PaymentOutcome::Succeeded,
            "failed" => PaymentOutcome::Failed,
            other => {
                return Err(DomainError::InvalidWebhook {
                    message: format!("unsupported event type: {}", other),
                })
            }
        };
        Ok(PaymentEvent {
            intent_id: intent_id.to_string(),
            outcome,
        })
    }
}
