//! Booking entity: the central record of a rental and its lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Lifecycle state of a booking
///
/// Transitions are monotonic: `pending → active → completed`, with
/// `cancelled` reachable from `pending` or `active`. `completed` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting host acceptance or payment confirmation
    Pending,
    /// Rental is confirmed and in progress
    Active,
    /// Rental period finished with payment settled
    Completed,
    /// Rejected, withdrawn, or aborted
    Cancelled,
}

impl BookingStatus {
    /// String form matching the stored column values
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Parse the stored column value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "active" => Some(BookingStatus::Active),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// Settlement state of the booking's payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "refunded" => Some(PaymentStatus::Refunded),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// Booking entity representing a rental of a car over a date range
///
/// Dates form a half-open interval `[start_date, end_date)`: a booking
/// ending on the day another starts does not conflict with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: Uuid,

    /// Renter who requested the booking
    pub renter_id: Uuid,

    /// Car being rented
    pub car_id: Uuid,

    /// First rental day (inclusive)
    pub start_date: NaiveDate,

    /// Day the rental ends (exclusive)
    pub end_date: NaiveDate,

    /// Total rental price
    pub total_price: Decimal,

    /// Refundable security deposit
    pub security_deposit: Decimal,

    /// Lifecycle state
    pub status: BookingStatus,

    /// Whether the rental contract has been signed
    pub contract_signed: bool,

    /// Reference to the signed contract, set only after signing
    pub contract_signature_url: Option<String>,

    /// External payment processor intent handle
    pub payment_intent_id: Option<String>,

    /// Settlement state
    pub payment_status: PaymentStatus,

    /// Timestamp when the booking was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the booking was last updated
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a new pending, unsigned, unpaid Booking
    pub fn new(
        renter_id: Uuid,
        car_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_price: Decimal,
        security_deposit: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            renter_id,
            car_id,
            start_date,
            end_date,
            total_price,
            security_deposit,
            status: BookingStatus::Pending,
            contract_signed: false,
            contract_signature_url: None,
            payment_intent_id: None,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this booking blocks the car's availability
    ///
    /// Only pending and active bookings occupy their date range.
    pub fn blocks_availability(&self) -> bool {
        matches!(self.status, BookingStatus::Pending | BookingStatus::Active)
    }

    /// Whether no further status transition is permitted
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            BookingStatus::Completed | BookingStatus::Cancelled
        )
    }

    /// Transition `pending → active`
    pub fn activate(&mut self) -> DomainResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(DomainError::conflict(format!(
                "cannot activate booking in status '{}'",
                self.status.as_str()
            )));
        }
        self.status = BookingStatus::Active;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Transition `active → completed`
    pub fn complete(&mut self) -> DomainResult<()> {
        if self.status != BookingStatus::Active {
            return Err(DomainError::conflict(format!(
                "cannot complete booking in status '{}'",
                self.status.as_str()
            )));
        }
        self.status = BookingStatus::Completed;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Transition `pending|active → cancelled`
    ///
    /// Terminal bookings reject cancellation rather than silently
    /// succeeding.
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.is_terminal() {
            return Err(DomainError::conflict(format!(
                "cannot cancel booking in status '{}'",
                self.status.as_str()
            )));
        }
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record a signed contract
    ///
    /// Does not change the lifecycle status; signing and payment are
    /// independent prerequisites for activation. `contract_signed` is never
    /// reset once true.
    pub fn sign_contract(&mut self, signature_url: impl Into<String>) -> DomainResult<()> {
        let signature_url = signature_url.into();
        if signature_url.is_empty() {
            return Err(DomainError::invalid_input("signature URL is required"));
        }
        if self.is_terminal() {
            return Err(DomainError::conflict(format!(
                "cannot sign contract for booking in status '{}'",
                self.status.as_str()
            )));
        }
        self.contract_signed = true;
        self.contract_signature_url = Some(signature_url);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Apply a successful payment outcome
    ///
    /// Sets `payment_status = paid` and `status = active` together; the two
    /// are written back in a single update so they are never independently
    /// true-paid/still-pending. Idempotent: returns `Ok(false)` without
    /// mutating when the payment was already applied.
    pub fn apply_payment_succeeded(&mut self) -> DomainResult<bool> {
        if self.payment_status == PaymentStatus::Paid {
            return Ok(false);
        }
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::conflict(
                "payment succeeded for a cancelled booking",
            ));
        }
        self.payment_status = PaymentStatus::Paid;
        if self.status == BookingStatus::Pending {
            self.status = BookingStatus::Active;
        }
        self.updated_at = Utc::now();
        Ok(true)
    }

    /// Apply a failed payment outcome
    ///
    /// Status is left unchanged so the renter can retry the charge.
    pub fn apply_payment_failed(&mut self) {
        if self.payment_status == PaymentStatus::Paid {
            // A settled payment is never downgraded by a late failure event.
            return;
        }
        self.payment_status = PaymentStatus::Failed;
        self.updated_at = Utc::now();
    }

    /// Attach the payment processor's intent handle
    pub fn set_payment_intent(&mut self, intent_id: impl Into<String>) {
        self.payment_intent_id = Some(intent_id.into());
        self.updated_at = Utc::now();
    }
}
