//! Handler for POST /api/v1/payments/confirm

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::booking::BookingResponse;
use crate::dto::payment::ConfirmPaymentRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Confirm a payment by polling the processor for the intent status
///
/// Fallback path for clients that cannot wait for the webhook. The
/// processor is the source of truth: an intent it does not report as
/// succeeded responds 409.
pub async fn confirm_payment<B, C, P>(
    _auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
    request: web::Json<ConfirmPaymentRequest>,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .payment_service
        .confirm_payment(&request.payment_intent_id)
        .await
    {
        Ok(booking) => HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))),
        Err(e) => domain_error_response(&e),
    }
}
