//! Date-range availability checking.
//!
//! Bookings occupy half-open intervals `[start_date, end_date)`. Two
//! intervals conflict when each starts before the other ends, so a booking
//! that ends exactly on the day another starts does not conflict with it.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::BookingRepository;

/// Half-open interval overlap test
///
/// Returns true when `[a_start, a_end)` and `[b_start, b_end)` intersect.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start < b_end && b_start < a_end
}

/// Read-only availability checks over the booking store
///
/// This is the query-side entry point. Booking creation does NOT call this
/// checker and then insert; the atomic check-and-insert lives inside
/// [`BookingRepository::create`] so the decision and the write cannot be
/// separated by a concurrent request.
pub struct AvailabilityChecker<B: BookingRepository> {
    booking_repository: Arc<B>,
}

impl<B: BookingRepository> AvailabilityChecker<B> {
    /// Create a new availability checker
    pub fn new(booking_repository: Arc<B>) -> Self {
        Self { booking_repository }
    }

    /// Whether the car is free over `[start_date, end_date)`
    ///
    /// Considers only bookings that block availability (pending or active);
    /// cancelled and completed bookings release their dates.
    ///
    /// # Returns
    /// * `Ok(true)` - No blocking booking overlaps the requested interval
    /// * `Ok(false)` - At least one blocking booking overlaps
    /// * `Err(DomainError::InvalidInput)` - `start_date >= end_date`
    pub async fn is_available(
        &self,
        car_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> DomainResult<bool> {
        if start_date >= end_date {
            return Err(DomainError::invalid_input(
                "start_date must be before end_date",
            ));
        }

        let blocking = self
            .booking_repository
            .find_blocking_by_car(car_id)
            .await?;

        Ok(!blocking
            .iter()
            .any(|b| overlaps(b.start_date, b.end_date, start_date, end_date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_partial_overlap() {
        assert!(overlaps(
            date(2024, 6, 1),
            date(2024, 6, 5),
            date(2024, 6, 3),
            date(2024, 6, 7),
        ));
    }

    #[test]
    fn test_adjacent_intervals_do_not_overlap() {
        // One ends exactly when the other starts: back-to-back is allowed.
        assert!(!overlaps(
            date(2024, 6, 1),
            date(2024, 6, 5),
            date(2024, 6, 5),
            date(2024, 6, 10),
        ));
        assert!(!overlaps(
            date(2024, 6, 5),
            date(2024, 6, 10),
            date(2024, 6, 1),
            date(2024, 6, 5),
        ));
    }

    #[test]
    fn test_containment_is_detected_in_both_orders() {
        let outer = (date(2024, 6, 1), date(2024, 6, 10));
        let inner = (date(2024, 6, 3), date(2024, 6, 5));
        assert!(overlaps(outer.0, outer.1, inner.0, inner.1));
        assert!(overlaps(inner.0, inner.1, outer.0, outer.1));
    }

    #[test]
    fn test_identical_intervals_overlap() {
        assert!(overlaps(
            date(2024, 6, 1),
            date(2024, 6, 5),
            date(2024, 6, 1),
            date(2024, 6, 5),
        ));
    }

    #[test]
    fn test_disjoint_intervals() {
        assert!(!overlaps(
            date(2024, 6, 1),
            date(2024, 6, 3),
            date(2024, 6, 10),
            date(2024, 6, 12),
        ));
    }
}
