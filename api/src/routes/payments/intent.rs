//! Handler for POST /api/v1/payments/intent

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::payment::CreateIntentRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Create a payment intent for a booking
///
/// Responds with the intent id and the client secret the frontend needs
/// to confirm the charge.
pub async fn create_intent<B, C, P>(
    _auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
    request: web::Json<CreateIntentRequest>,
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
        .create_intent(request.booking_id, request.amount)
        .await
    {
        Ok(intent) => HttpResponse::Ok().json(ApiResponse::success(intent)),
        Err(e) => domain_error_response(&e),
    }
}
