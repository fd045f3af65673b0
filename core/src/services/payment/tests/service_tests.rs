//! Tests for PaymentService covering intent creation, webhook
//! reconciliation, and idempotence under duplicate event delivery.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus, PaymentStatus};
use crate::errors::DomainError;
use crate::repositories::{BookingRepository, MockBookingRepository};
use crate::services::payment::{IntentStatus, PaymentOutcome, PaymentService};

use super::mocks::MockPaymentProvider;

struct TestContext {
    service: PaymentService<MockBookingRepository, MockPaymentProvider>,
    booking_repo: Arc<MockBookingRepository>,
    provider: Arc<MockPaymentProvider>,
}

fn setup() -> TestContext {
    let booking_repo = Arc::new(MockBookingRepository::new());
    let provider = Arc::new(MockPaymentProvider::new());
    let service = PaymentService::new(booking_repo.clone(), provider.clone());
    TestContext {
        service,
        booking_repo,
        provider,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_booking(ctx: &TestContext) -> Booking {
    let booking = Booking::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        date(2024, 6, 1),
        date(2024, 6, 5),
        Decimal::from(200),
        Decimal::from(50),
    );
    ctx.booking_repo.insert_raw(booking.clone()).await;
    booking
}

async fn seed_booking_with_intent(ctx: &TestContext, intent_id: &str) -> Booking {
    let mut booking = Booking::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        date(2024, 6, 1),
        date(2024, 6, 5),
        Decimal::from(200),
        Decimal::from(50),
    );
    booking.set_payment_intent(intent_id);
    ctx.booking_repo.insert_raw(booking.clone()).await;
    booking
}

#[tokio::test]
async fn test_create_intent_stores_reference_on_booking() {
    let ctx = setup();
    let booking = seed_booking(&ctx).await;

    let intent = ctx
        .service
        .create_intent(booking.id, Decimal::from(200))
        .await
        .unwrap();
    assert!(!intent.client_secret.is_empty());
    assert_eq!(ctx.provider.intents_created.load(Ordering::SeqCst), 1);

    let stored = ctx
        .booking_repo
        .find_by_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.payment_intent_id.as_deref(), Some(intent.intent_id.as_str()));
}

#[tokio::test]
async fn test_create_intent_unknown_booking() {
    let ctx = setup();
    let err = ctx
        .service
        .create_intent(Uuid::new_v4(), Decimal::from(200))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_create_intent_rejects_non_positive_amount() {
    let ctx = setup();
    let booking = seed_booking(&ctx).await;
    let err = ctx
        .service
        .create_intent(booking.id, Decimal::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_succeeded_event_activates_and_pays() {
    let ctx = setup();
    let booking = seed_booking_with_intent(&ctx, "pi_1").await;

    let updated = ctx
        .service
        .handle_webhook(b"pi_1:succeeded", "valid")
        .await
        .unwrap();
    assert_eq!(updated.id, booking.id);
    assert_eq!(updated.status, BookingStatus::Active);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_duplicate_succeeded_event_is_noop_success() {
    let ctx = setup();
    seed_booking_with_intent(&ctx, "pi_1").await;

    let first = ctx
        .service
        .handle_webhook(b"pi_1:succeeded", "valid")
        .await
        .unwrap();

    // Same event delivered again: success, state unchanged.
    let second = ctx
        .service
        .handle_webhook(b"pi_1:succeeded", "valid")
        .await
        .unwrap();
    assert_eq!(second.status, BookingStatus::Active);
    assert_eq!(second.payment_status, PaymentStatus::Paid);
    assert_eq!(second.updated_at, first.updated_at);
}

#[tokio::test]
async fn test_failed_event_keeps_booking_pending() {
    let ctx = setup();
    let booking = seed_booking_with_intent(&ctx, "pi_1").await;

    let updated = ctx
        .service
        .handle_webhook(b"pi_1:failed", "valid")
        .await
        .unwrap();
    assert_eq!(updated.id, booking.id);
    assert_eq!(updated.payment_status, PaymentStatus::Failed);
    // Status unchanged so the renter can retry the charge.
    assert_eq!(updated.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_invalid_signature_mutates_nothing() {
    let ctx = setup();
    let booking = seed_booking_with_intent(&ctx, "pi_1").await;

    let err = ctx
        .service
        .handle_webhook(b"pi_1:succeeded", "forged")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidWebhook { .. }));

    let stored = ctx
        .booking_repo
        .find_by_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
    assert_eq!(stored.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_unsupported_event_type_is_invalid_webhook() {
    let ctx = setup();
    seed_booking_with_intent(&ctx, "pi_1").await;

    let err = ctx
        .service
        .handle_webhook(b"pi_1:created", "valid")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidWebhook { .. }));
}

#[tokio::test]
async fn test_event_for_unknown_intent_is_not_found() {
    let ctx = setup();
    let err = ctx
        .service
        .handle_webhook(b"pi_unknown:succeeded", "valid")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_confirm_payment_succeeded_reconciles() {
    let ctx = setup();
    let booking = seed_booking_with_intent(&ctx, "pi_1").await;
    ctx.provider.set_retrieve_status(IntentStatus::Succeeded);

    let updated = ctx.service.confirm_payment("pi_1").await.unwrap();
    assert_eq!(updated.id, booking.id);
    assert_eq!(updated.status, BookingStatus::Active);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_confirm_payment_incomplete_is_conflict() {
    let ctx = setup();
    seed_booking_with_intent(&ctx, "pi_1").await;
    ctx.provider.set_retrieve_status(IntentStatus::Processing);

    let err = ctx.service.confirm_payment("pi_1").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_succeeded_event_for_cancelled_booking_is_conflict() {
    let ctx = setup();
    let mut booking = seed_booking_with_intent(&ctx, "pi_1").await;
    booking.cancel().unwrap();
    ctx.booking_repo.update(booking.clone()).await.unwrap();

    let err = ctx
        .service
        .reconcile("pi_1", PaymentOutcome::Succeeded)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    let stored = ctx
        .booking_repo
        .find_by_id(booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn test_duplicate_failed_event_is_noop() {
    let ctx = setup();
    seed_booking_with_intent(&ctx, "pi_1").await;

    ctx.service
        .reconcile("pi_1", PaymentOutcome::Failed)
        .await
        .unwrap();
    let second = ctx
        .service
        .reconcile("pi_1", PaymentOutcome::Failed)
        .await
        .unwrap();
    assert_eq!(second.payment_status, PaymentStatus::Failed);
}
