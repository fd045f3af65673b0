//! Application state and factory
//!
//! This module holds the shared service state and the factory that
//! assembles the Actix-web application with its routes and middleware.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{bookings, cars, host, payments};

use ds_core::repositories::{BookingRepository, CarRepository};
use ds_core::services::booking::{AvailabilityChecker, BookingService};
use ds_core::services::payment::{PaymentProvider, PaymentService};

/// Application state that holds shared services
pub struct AppState<B, C, P>
where
    B: BookingRepository,
    C: CarRepository,
    P: PaymentProvider,
{
    pub booking_service: Arc<BookingService<B, C>>,
    pub payment_service: Arc<PaymentService<B, P>>,
    pub availability_checker: Arc<AvailabilityChecker<B>>,
}

/// Create and configure the application with all dependencies
pub fn create_app<B, C, P>(
    app_state: web::Data<AppState<B, C, P>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    B: BookingRepository + 'static,
    C: CarRepository + 'static,
    P: PaymentProvider + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Availability is public: renters browse before signing in
                .route(
                    "/cars/{car_id}/availability",
                    web::get().to(cars::availability::check_availability::<B, C, P>),
                )
                .service(
                    web::scope("/bookings")
                        .wrap(JwtAuth::new())
                        .route("", web::post().to(bookings::create::create_booking::<B, C, P>))
                        .route("/my", web::get().to(bookings::my_bookings::my_bookings::<B, C, P>))
                        .route(
                            "/{booking_id}",
                            web::get().to(bookings::get::get_booking::<B, C, P>),
                        )
                        .route(
                            "/{booking_id}/sign-contract",
                            web::post().to(bookings::sign_contract::sign_contract::<B, C, P>),
                        )
                        .route(
                            "/{booking_id}/cancel",
                            web::post().to(bookings::cancel::cancel_booking::<B, C, P>),
                        ),
                )
                .service(
                    web::scope("/host")
                        .wrap(JwtAuth::new())
                        .route(
                            "/requests",
                            web::get().to(host::requests::pending_requests::<B, C, P>),
                        )
                        .route(
                            "/requests/{booking_id}/accept",
                            web::post().to(host::accept::accept_request::<B, C, P>),
                        )
                        .route(
                            "/requests/{booking_id}/reject",
                            web::post().to(host::reject::reject_request::<B, C, P>),
                        ),
                )
                .service(
                    web::scope("/payments")
                        // The webhook authenticates by signature, not JWT
                        .route(
                            "/webhook",
                            web::post().to(payments::webhook::payment_webhook::<B, C, P>),
                        )
                        .service(
                            web::scope("")
                                .wrap(JwtAuth::new())
                                .route(
                                    "/intent",
                                    web::post().to(payments::intent::create_intent::<B, C, P>),
                                )
                                .route(
                                    "/confirm",
                                    web::post().to(payments::confirm::confirm_payment::<B, C, P>),
                                ),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "driveshare-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}
