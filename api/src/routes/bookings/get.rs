//! Handler for GET /api/v1/bookings/{booking_id}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::booking::BookingResponse;
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthContext;

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Fetch a single booking by id
pub async fn get_booking<B, C, P>(
    _auth: AuthContext,
    state: web::Data<AppState<B, C, P>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    match state.booking_service.get_booking(path.into_inner()).await {
        Ok(booking) => HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))),
        Err(e) => domain_error_response(&e),
    }
}
