//! Handler for GET /api/v1/host/requests

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::booking::BookingResponse;
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthContext;

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// List pending booking requests across all cars the host owns
pub async fn pending_requests<B, C, P>(
    auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    match state
        .booking_service
        .pending_requests_for_host(auth.user_id)
        .await
    {
        Ok(bookings) => {
            let response: Vec<BookingResponse> =
                bookings.into_iter().map(BookingResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(response))
        }
        Err(e) => domain_error_response(&e),
    }
}
