//! Handler for GET /api/v1/cars/{car_id}/availability

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::booking::{AvailabilityQuery, AvailabilityResponse};
use crate::handlers::error::domain_error_response;

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::payment::PaymentProvider;
use ds_shared::types::ApiResponse;

/// Check whether a car is free over a half-open date range
///
/// A booking ending on `start_date` does not conflict. If the store is
/// unreachable the handler responds 503 rather than guessing at an
/// answer.
pub async fn check_availability<B, C, P>(
    state: web::Data<AppState<B, C, P>>,
    path: web::Path<Uuid>,
    query: web::Query<AvailabilityQuery>,
) -> HttpResponse
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    let car_id = path.into_inner();

    match state
        .availability_checker
        .is_available(car_id, query.start_date, query.end_date)
        .await
    {
        Ok(available) => HttpResponse::Ok().json(ApiResponse::success(AvailabilityResponse {
            car_id,
            start_date: query.start_date,
            end_date: query.end_date,
            available,
        })),
        Err(e) => domain_error_response(&e),
    }
}
