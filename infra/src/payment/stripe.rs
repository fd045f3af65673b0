//! Stripe payment gateway.
//!
//! Talks to the Stripe REST API with form-encoded requests over the shared
//! reqwest client. Webhook payloads are authenticated with
//! [`signature::verify`](super::signature::verify) before any field of the
//! body is trusted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use ds_core::errors::{DomainError, DomainResult};
use ds_core::services::payment::{IntentStatus, PaymentEvent, PaymentIntent, PaymentOutcome, PaymentProvider};
use ds_shared::config::PaymentConfig;

use super::signature;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Stripe-backed implementation of PaymentProvider
pub struct StripeGateway {
    client: Client,
    config: PaymentConfig,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: EventObject,
}

#[derive(Debug, Deserialize)]
struct EventObject {
    id: String,
}

impl StripeGateway {
    /// Create a gateway from payment configuration
    pub fn new(config: PaymentConfig) -> Result<Self, crate::InfrastructureError> {
        if !config.is_configured() {
            return Err(crate::InfrastructureError::Config(
                "Stripe secret key and webhook secret must be set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| crate::InfrastructureError::Config(e.to_string()))?;

        Ok(Self {
            client,
            config,
            base_url: STRIPE_API_BASE.to_string(),
        })
    }

    fn provider_err(context: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::Storage {
            message: format!("{}: {}", context, e),
        }
    }

    async fn read_intent_response(response: reqwest::Response) -> DomainResult<IntentResponse> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::provider_err(
                "payment processor rejected request",
                format!("{} {}", status, body),
            ));
        }

        response
            .json::<IntentResponse>()
            .await
            .map_err(|e| Self::provider_err("malformed payment processor response", e))
    }
}

#[async_trait]
impl PaymentProvider for StripeGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        booking_id: Uuid,
    ) -> DomainResult<PaymentIntent> {
        let amount = amount_minor.to_string();
        let booking_ref = booking_id.to_string();
        let params: Vec<(&str, &str)> = vec![
            ("amount", amount.as_str()),
            ("currency", self.config.currency.as_str()),
            ("metadata[booking_id]", booking_ref.as_str()),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        let response = self
            .client
            .post(format!("{}/payment_intents", self.base_url))
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| Self::provider_err("payment processor unreachable", e))?;

        let intent = Self::read_intent_response(response).await?;
        let client_secret = intent.client_secret.ok_or_else(|| {
            Self::provider_err("malformed payment processor response", "missing client_secret")
        })?;

        tracing::info!(intent_id = %intent.id, booking_id = %booking_id, "created payment intent");

        Ok(PaymentIntent {
            intent_id: intent.id,
            client_secret,
        })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> DomainResult<IntentStatus> {
        let response = self
            .client
            .get(format!("{}/payment_intents/{}", self.base_url, intent_id))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .map_err(|e| Self::provider_err("payment processor unreachable", e))?;

        let intent = Self::read_intent_response(response).await?;

        Ok(match intent.status.as_str() {
            "succeeded" => IntentStatus::Succeeded,
            "canceled" => IntentStatus::Failed,
            _ => IntentStatus::Processing,
        })
    }

    fn verify_event(&self, payload: &[u8], signature_header: &str) -> DomainResult<PaymentEvent> {
        signature::verify(
            payload,
            signature_header,
            &self.config.webhook_secret,
            self.config.webhook_tolerance_seconds,
        )?;

        let envelope: EventEnvelope =
            serde_json::from_slice(payload).map_err(|e| DomainError::InvalidWebhook {
                message: format!("unparseable webhook payload: {}", e),
            })?;

        let outcome = match envelope.event_type.as_str() {
            "payment_intent.succeeded" => PaymentOutcome::Succeeded,
            "payment_intent.payment_failed" => PaymentOutcome::Failed,
            other => {
                return Err(DomainError::InvalidWebhook {
                    message: format!("unsupported event type: {}", other),
                })
            }
        };

        Ok(PaymentEvent {
            intent_id: envelope.data.object.id,
            outcome,
        })
    }
}
