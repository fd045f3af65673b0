//! End-to-end booking flow tests against the in-memory repositories.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use rust_decimal::Decimal;
use uuid::Uuid;

use ds_api::app::{create_app, AppState};
use ds_api::middleware::auth::Claims;
use ds_core::domain::entities::car::Car;
use ds_core::errors::{DomainError, DomainResult};
use ds_core::repositories::{MockBookingRepository, MockCarRepository};
use ds_core::services::booking::{AvailabilityChecker, BookingService, BookingServiceConfig};
use ds_core::services::payment::{
    IntentStatus, PaymentEvent, PaymentIntent, PaymentOutcome, PaymentProvider, PaymentService,
};

const JWT_SECRET: &str = "test_secret";

/// Provider stub with a trivially checkable signature scheme:
/// the header must be `valid` and the payload is `<intent_id>:<outcome>`.
struct StubPaymentProvider;

#[async_trait]
impl PaymentProvider for StubPaymentProvider {
    async fn create_intent(
        &self,
        _amount_minor: i64,
        _booking_id: Uuid,
    ) -> DomainResult<PaymentIntent> {
        Ok(PaymentIntent {
            intent_id: "pi_stub".to_string(),
            client_secret: "cs_stub".to_string(),
        })
    }

    async fn retrieve_intent(&self, _intent_id: &str) -> DomainResult<IntentStatus> {
        Ok(IntentStatus::Succeeded)
    }

    fn verify_event(&self, payload: &[u8], signature: &str) -> DomainResult<PaymentEvent> {
        if signature != "valid" {
            return Err(DomainError::InvalidWebhook {
                message: "bad signature".to_string(),
            });
        }
        let text = std::str::from_utf8(payload).map_err(|_| DomainError::InvalidWebhook {
            message: "binary payload".to_string(),
        })?;
        let (intent_id, outcome) = text.split_once(':').ok_or(DomainError::InvalidWebhook {
            message: "malformed payload".to_string(),
        })?;
        let outcome = match outcome {
            "succeeded" => PaymentOutcome::Succeeded,
            "failed" => PaymentOutcome::Failed,
            _ => {
                return Err(DomainError::InvalidWebhook {
                    message: "unsupported event".to_string(),
                })
            }
        };
        Ok(PaymentEvent {
            intent_id: intent_id.to_string(),
            outcome,
        })
    }
}

struct TestContext {
    state: web::Data<AppState<MockBookingRepository, MockCarRepository, StubPaymentProvider>>,
    car_repository: Arc<MockCarRepository>,
}

fn build_state() -> TestContext {
    std::env::set_var("JWT_SECRET", JWT_SECRET);

    let booking_repository = Arc::new(MockBookingRepository::new());
    let car_repository = Arc::new(MockCarRepository::new());
    let provider = Arc::new(StubPaymentProvider);

    let state = web::Data::new(AppState {
        booking_service: Arc::new(BookingService::new(
            booking_repository.clone(),
            car_repository.clone(),
            BookingServiceConfig::default(),
        )),
        payment_service: Arc::new(PaymentService::new(booking_repository.clone(), provider)),
        availability_checker: Arc::new(AvailabilityChecker::new(booking_repository)),
    });

    TestContext {
        state,
        car_repository,
    }
}

fn bearer_token(user_id: Uuid) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        role: None,
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

fn booking_body(car_id: Uuid, start: &str, end: &str) -> serde_json::Value {
    serde_json::json!({
        "car_id": car_id,
        "start_date": start,
        "end_date": end,
        "total_price": "200",
        "security_deposit": "50",
    })
}

#[actix_web::test]
async fn test_create_booking_and_reject_overlap() {
    let ctx = build_state();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let renter = Uuid::new_v4();
    let car_id = Uuid::new_v4();

    let resp = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(("Authorization", bearer_token(renter)))
        .set_json(booking_body(car_id, "2025-06-01", "2025-06-05"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["payment_status"], "pending");

    // Overlapping range for the same car is rejected without a new row.
    let resp = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(("Authorization", bearer_token(Uuid::new_v4())))
        .set_json(booking_body(car_id, "2025-06-03", "2025-06-07"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DATES_UNAVAILABLE");

    // Back-to-back is allowed: the range is half-open.
    let resp = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(("Authorization", bearer_token(Uuid::new_v4())))
        .set_json(booking_body(car_id, "2025-06-05", "2025-06-08"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_bookings_require_authentication() {
    let ctx = build_state();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    // The middleware answers with a proper 401 response body, not a
    // service-level error.
    let resp = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(booking_body(Uuid::new_v4(), "2025-06-01", "2025-06-05"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    let resp = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .set_json(booking_body(Uuid::new_v4(), "2025-06-01", "2025-06-05"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_availability_endpoint_is_public() {
    let ctx = build_state();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let car_id = Uuid::new_v4();
    let uri = format!(
        "/api/v1/cars/{}/availability?start_date=2025-06-01&end_date=2025-06-05",
        car_id
    );
    let resp = test::TestRequest::get().uri(&uri).send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["available"], true);

    // Inverted range is a client error, not "unavailable".
    let uri = format!(
        "/api/v1/cars/{}/availability?start_date=2025-06-05&end_date=2025-06-01",
        car_id
    );
    let resp = test::TestRequest::get().uri(&uri).send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_host_accept_flow() {
    let ctx = build_state();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let renter = Uuid::new_v4();
    let host = Uuid::new_v4();
    let car = Car::new(host, "Tesla", "Model 3", Decimal::from(80));
    let car_id = car.id;
    ctx.car_repository.insert(car).await;

    let resp = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(("Authorization", bearer_token(renter)))
        .set_json(booking_body(car_id, "2025-07-01", "2025-07-04"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let booking_id = body["data"]["id"].as_str().unwrap().to_string();

    // Accepting before the contract is signed conflicts.
    let resp = test::TestRequest::post()
        .uri(&format!("/api/v1/host/requests/{}/accept", booking_id))
        .insert_header(("Authorization", bearer_token(host)))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::TestRequest::post()
        .uri(&format!("/api/v1/bookings/{}/sign-contract", booking_id))
        .insert_header(("Authorization", bearer_token(renter)))
        .set_json(serde_json::json!({ "signature_url": "https://cdn.example.com/sig/1.png" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // A non-owner cannot accept the request.
    let resp = test::TestRequest::post()
        .uri(&format!("/api/v1/host/requests/{}/accept", booking_id))
        .insert_header(("Authorization", bearer_token(Uuid::new_v4())))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::TestRequest::post()
        .uri(&format!("/api/v1/host/requests/{}/accept", booking_id))
        .insert_header(("Authorization", bearer_token(host)))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "active");
}

#[actix_web::test]
async fn test_payment_webhook_reconciles_and_is_idempotent() {
    let ctx = build_state();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let renter = Uuid::new_v4();
    let car_id = Uuid::new_v4();

    let resp = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .insert_header(("Authorization", bearer_token(renter)))
        .set_json(booking_body(car_id, "2025-08-01", "2025-08-04"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let booking_id = body["data"]["id"].as_str().unwrap().to_string();

    // Attach an intent to the booking.
    let resp = test::TestRequest::post()
        .uri("/api/v1/payments/intent")
        .insert_header(("Authorization", bearer_token(renter)))
        .set_json(serde_json::json!({ "booking_id": booking_id, "amount": "200" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["intent_id"], "pi_stub");

    // Unverifiable delivery is rejected before touching anything.
    let resp = test::TestRequest::post()
        .uri("/api/v1/payments/webhook")
        .insert_header(("Stripe-Signature", "forged"))
        .set_payload("pi_stub:succeeded")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::TestRequest::post()
        .uri("/api/v1/payments/webhook")
        .insert_header(("Stripe-Signature", "valid"))
        .set_payload("pi_stub:succeeded")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // At-least-once delivery: the duplicate is acknowledged, not an error.
    let resp = test::TestRequest::post()
        .uri("/api/v1/payments/webhook")
        .insert_header(("Stripe-Signature", "valid"))
        .set_payload("pi_stub:succeeded")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::TestRequest::get()
        .uri(&format!("/api/v1/bookings/{}", booking_id))
        .insert_header(("Authorization", bearer_token(renter)))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["payment_status"], "paid");
    assert_eq!(body["data"]["status"], "active");
}
