//! Handler for POST /api/v1/bookings/{booking_id}/sign-contract

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::booking::{BookingResponse, SignContractRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use ds_core::errors::DomainError;
use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Record the renter's signature on the rental contract
///
/// Only the renter who created the booking may sign it.
pub async fn sign_contract<B, C, P>(
    auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
    path: web::Path<Uuid>,
    request: web::Json<SignContractRequest>,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let booking_id = path.into_inner();
    let booking = match state.booking_service.get_booking(booking_id).await {
        Ok(booking) => booking,
        Err(e) => return domain_error_response(&e),
    };
    if booking.renter_id != auth.user_id {
        return domain_error_response(&DomainError::Forbidden);
    }

    match state
        .booking_service
        .sign_contract(booking_id, &request.signature_url)
        .await
    {
        Ok(booking) => HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))),
        Err(e) => domain_error_response(&e),
    }
}
