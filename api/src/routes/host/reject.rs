//! Handler for POST /api/v1/host/requests/{booking_id}/reject

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::booking::BookingResponse;
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthContext;

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Reject a pending booking request
///
/// The caller must own the booked car. The booking is cancelled and its
/// dates become bookable again.
pub async fn reject_request<B, C, P>(
    auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    match state
        .booking_service
        .reject_request(path.into_inner(), auth.user_id)
        .await
    {
        Ok(booking) => HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))),
        Err(e) => domain_error_response(&e),
    }
}
