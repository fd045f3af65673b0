//! Booking repository trait defining the interface for booking persistence.
//!
//! This module defines the repository pattern interface for Booking
//! entities. The trait is async-first and uses Result types for proper
//! error handling. A store failure surfaces as `DomainError::Storage`;
//! implementations never substitute fabricated data for a missing store.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::errors::DomainResult;

/// Repository trait for Booking entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
///
/// # Atomicity contract
///
/// `create` MUST perform the date-range overlap check and the insert as a
/// single atomic unit. Checking and inserting as two independent store
/// operations admits a race where two concurrent requests both observe the
/// car as free and both insert, double-booking the car. The MySQL
/// implementation serializes per car with a named lock; the in-memory mock
/// holds its write lock across both steps.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking if the car is free over its date range
    ///
    /// # Returns
    /// * `Ok(Booking)` - The created booking
    /// * `Err(DomainError::Unavailable)` - A pending or active booking for
    ///   the same car overlaps `[start_date, end_date)`
    /// * `Err(DomainError::Storage)` - Store unreachable or erroring
    async fn create(&self, booking: Booking) -> DomainResult<Booking>;

    /// Find a booking by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// All bookings created by a renter, newest first
    async fn find_by_renter(&self, renter_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// All bookings for a car, newest first
    async fn find_by_car(&self, car_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// Bookings for a car that block its availability (pending or active)
    async fn find_blocking_by_car(&self, car_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// Find the booking holding the given payment intent reference
    async fn find_by_payment_intent(&self, intent_id: &str) -> DomainResult<Option<Booking>>;

    /// Active, paid bookings whose rental period ended on or before `date`
    ///
    /// Input for the scheduled completion sweep.
    async fn find_ended_active(&self, date: NaiveDate) -> DomainResult<Vec<Booking>>;

    /// Write back a mutated booking
    ///
    /// The whole row is written in one statement so coupled fields
    /// (`payment_status` + `status`) change together.
    ///
    /// # Returns
    /// * `Ok(Booking)` - The updated booking
    /// * `Err(DomainError::NotFound)` - No booking with this id
    async fn update(&self, booking: Booking) -> DomainResult<Booking>;

    /// Delete a booking
    ///
    /// # Returns
    /// * `Ok(true)` - Booking was deleted
    /// * `Ok(false)` - Booking not found
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
