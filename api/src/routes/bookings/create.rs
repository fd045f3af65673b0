//! Handler for POST /api/v1/bookings

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::booking::{BookingResponse, CreateBookingRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Create a booking request for a car over a date range
///
/// The date range is half-open: `end_date` is the day the car is returned
/// and may be the `start_date` of another booking. On a date conflict the
/// handler responds 409 with code `DATES_UNAVAILABLE` and no booking is
/// created.
pub async fn create_booking<B, C, P>(
    auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
    request: web::Json<CreateBookingRequest>,
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
        .booking_service
        .create_booking(
            auth.user_id,
            request.car_id,
            request.start_date,
            request.end_date,
            request.total_price,
            request.security_deposit,
        )
        .await
    {
        Ok(booking) => {
            HttpResponse::Created().json(ApiResponse::success(BookingResponse::from(booking)))
        }
        Err(e) => domain_error_response(&e),
    }
}
