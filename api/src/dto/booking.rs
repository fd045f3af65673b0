//! Booking request and response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ds_core::domain::entities::booking::{Booking, BookingStatus, PaymentStatus};

/// Request body for POST /bookings
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Car to book
    pub car_id: Uuid,
    /// First rental day (inclusive)
    pub start_date: NaiveDate,
    /// Day the rental ends (exclusive)
    pub end_date: NaiveDate,
    /// Agreed rental price
    pub total_price: Decimal,
    /// Deposit amount
    pub security_deposit: Decimal,
}

/// Request body for POST /bookings/{id}/sign-contract
#[derive(Debug, Deserialize, Validate)]
pub struct SignContractRequest {
    /// Reference to the captured signature document
    #[validate(length(min = 1, max = 2048, message = "signature_url must not be empty"))]
    pub signature_url: String,
}

/// Query parameters for GET /cars/{id}/availability
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// First day of the candidate range (inclusive)
    pub start_date: NaiveDate,
    /// End of the candidate range (exclusive)
    pub end_date: NaiveDate,
}

/// Availability check result
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub car_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub available: bool,
}

/// Booking representation returned by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub renter_id: Uuid,
    pub car_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub security_deposit: Decimal,
    pub status: BookingStatus,
    pub contract_signed: bool,
    pub contract_signature_url: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            renter_id: booking.renter_id,
            car_id: booking.car_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_price: booking.total_price,
            security_deposit: booking.security_deposit,
            status: booking.status,
            contract_signed: booking.contract_signed,
            contract_signature_url: booking.contract_signature_url,
            payment_status: booking.payment_status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
