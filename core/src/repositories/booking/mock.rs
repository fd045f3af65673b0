//! Mock implementation of BookingRepository for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus, PaymentStatus};
use crate::errors::{DomainError, DomainResult};
use crate::services::booking::availability::overlaps;

use super::trait_::BookingRepository;

/// Mock booking repository for testing
///
/// The overlap check in `create` runs under the map's write lock, so
/// check-and-insert is atomic just like the production implementation.
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl MockBookingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            bookings: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with an existing booking, bypassing checks
    pub async fn insert_raw(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }
}

impl Default for MockBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn create(&self, booking: Booking) -> DomainResult<Booking> {
        let mut bookings = self.bookings.write().await;

        let conflict = bookings.values().any(|existing| {
            existing.car_id == booking.car_id
                && existing.blocks_availability()
                && overlaps(
                    existing.start_date,
                    existing.end_date,
                    booking.start_date,
                    booking.end_date,
                )
        });
        if conflict {
            return Err(DomainError::Unavailable);
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn find_by_renter(&self, renter_id: Uuid) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut found: Vec<Booking> = bookings
            .values()
            .filter(|b| b.renter_id == renter_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_car(&self, car_id: Uuid) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut found: Vec<Booking> = bookings
            .values()
            .filter(|b| b.car_id == car_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_blocking_by_car(&self, car_id: Uuid) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.car_id == car_id && b.blocks_availability())
            .cloned()
            .collect())
    }

    async fn find_by_payment_intent(&self, intent_id: &str) -> DomainResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .find(|b| b.payment_intent_id.as_deref() == Some(intent_id))
            .cloned())
    }

    async fn find_ended_active(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| {
                b.status == BookingStatus::Active
                    && b.payment_status == PaymentStatus::Paid
                    && b.end_date <= date
            })
            .cloned()
            .collect())
    }

    async fn update(&self, booking: Booking) -> DomainResult<Booking> {
        let mut bookings = self.bookings.write().await;

        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::not_found("Booking"));
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings.remove(&id).is_some())
    }
}
