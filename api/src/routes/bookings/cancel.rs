//! Handler for POST /api/v1/bookings/{booking_id}/cancel

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::booking::BookingResponse;
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthContext;

use ds_core::errors::DomainError;
use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Cancel a booking
///
/// Only the renter who created the booking may cancel it through this
/// endpoint; hosts decline requests via the host routes. Completed and
/// already-cancelled bookings respond 409. The cancelled booking is kept
/// as a record and its dates become bookable again.
pub async fn cancel_booking<B, C, P>(
    auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    let booking_id = path.into_inner();
    let booking = match state.booking_service.get_booking(booking_id).await {
        Ok(booking) => booking,
        Err(e) => return domain_error_response(&e),
    };
    if booking.renter_id != auth.user_id {
        return domain_error_response(&DomainError::Forbidden);
    }

    match state.booking_service.cancel_booking(booking_id).await {
        Ok(booking) => HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))),
        Err(e) => domain_error_response(&e),
    }
}
