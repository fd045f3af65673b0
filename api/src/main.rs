//! DriveShare API server entry point.
//!
//! Wires the MySQL repositories and the Stripe gateway into the core
//! services, spawns the booking completion sweep, and serves the HTTP
//! API.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ds_api::app::{create_app, AppState};
use ds_core::services::booking::{
    AvailabilityChecker, BookingCompletionService, BookingService, BookingServiceConfig,
};
use ds_core::services::payment::PaymentService;
use ds_infra::{DatabasePool, MySqlBookingRepository, MySqlCarRepository, StripeGateway};
use ds_shared::config::AppConfig;

/// How often the completion sweep looks for ended rentals
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

fn io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting DriveShare API server");

    let config = AppConfig::from_env();

    let pool = DatabasePool::new(config.database.clone())
        .await
        .map_err(io_error)?;
    pool.health_check().await.map_err(io_error)?;
    info!("database connection established");

    let booking_repository = Arc::new(MySqlBookingRepository::new(pool.pool()));
    let car_repository = Arc::new(MySqlCarRepository::new(pool.pool()));
    let payment_gateway = Arc::new(StripeGateway::new(config.payment.clone()).map_err(io_error)?);

    let booking_service = Arc::new(BookingService::new(
        booking_repository.clone(),
        car_repository.clone(),
        BookingServiceConfig::default(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        booking_repository.clone(),
        payment_gateway,
    ));
    let availability_checker = Arc::new(AvailabilityChecker::new(booking_repository.clone()));

    // Background sweep moving ended rentals to completed.
    let completion_service = BookingCompletionService::new(booking_repository.clone());
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let today = chrono::Utc::now().date_naive();
            match completion_service.run_sweep(today).await {
                Ok(result) if result.completed > 0 || !result.errors.is_empty() => {
                    info!(
                        completed = result.completed,
                        errors = result.errors.len(),
                        "completion sweep finished"
                    );
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "completion sweep failed"),
            }
        }
    });

    let app_state = web::Data::new(AppState {
        booking_service,
        payment_service,
        availability_checker,
    });

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "binding HTTP server");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    // A zero worker count means "use the server's CPU-count default".
    if let Some(workers) = config.server.effective_workers() {
        server = server.workers(workers);
    }
    server
        .bind(&bind_address)
        .map_err(|e| {
            error!(address = %bind_address, error = %e, "failed to bind");
            e
        })?
        .run()
        .await
}
