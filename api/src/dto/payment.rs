//! Payment request DTOs.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Request body for POST /payments/intent
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIntentRequest {
    /// Booking the payment is for
    pub booking_id: Uuid,
    /// Charge amount in major currency units
    pub amount: Decimal,
}

/// Request body for POST /payments/confirm
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmPaymentRequest {
    /// Processor intent identifier returned at intent creation
    #[validate(length(min = 1, message = "payment_intent_id must not be empty"))]
    pub payment_intent_id: String,
}
