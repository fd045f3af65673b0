//! Handler for POST /api/v1/payments/webhook

use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::handlers::error::domain_error_response;

use ds_core::errors::DomainError;
use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;

const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Receive a payment event from the processor
///
/// The raw body is verified against the signature header before any field
/// is trusted. Delivery is at-least-once, so reconciliation is idempotent
/// and a duplicate event responds 200. Transient storage failures respond
/// 503 so the processor retries the delivery.
pub async fn payment_webhook<B, C, P>(
    req: HttpRequest,
    state: web::Data<AppState<B, C, P>>,
    payload: web::Bytes,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    let signature = match req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(signature) => signature,
        None => {
            return domain_error_response(&DomainError::InvalidWebhook {
                message: "missing signature header".to_string(),
            });
        }
    };

    match state.payment_service.handle_webhook(&payload, signature).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "received": true })),
        Err(e) => domain_error_response(&e),
    }
}
