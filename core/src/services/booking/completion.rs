//! Scheduled completion of ended rentals
//!
//! A booking finishes its lifecycle outside the interactive request flow:
//! once the rental period has passed and the payment is settled, the
//! booking moves from `active` to `completed`. This sweep is meant to run
//! periodically from the server binary.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::errors::DomainResult;
use crate::repositories::BookingRepository;

/// Summary of one completion sweep
#[derive(Debug, Default)]
pub struct CompletionSweepResult {
    /// Bookings transitioned to completed
    pub completed: usize,
    /// Per-booking failures (logged, not fatal to the sweep)
    pub errors: Vec<String>,
}

/// Service completing active, paid bookings whose rental period ended
pub struct BookingCompletionService<B: BookingRepository + 'static> {
    booking_repository: Arc<B>,
}

impl<B: BookingRepository> BookingCompletionService<B> {
    /// Create a new completion service
    pub fn new(booking_repository: Arc<B>) -> Self {
        Self { booking_repository }
    }

    /// Run a single sweep as of the given date
    ///
    /// Selects active bookings with `payment_status = paid` whose
    /// `end_date` is on or before `today` and completes each one. A failure
    /// on one booking is recorded and the sweep continues.
    pub async fn run_sweep(&self, today: NaiveDate) -> DomainResult<CompletionSweepResult> {
        let due = self.booking_repository.find_ended_active(today).await?;

        let mut result = CompletionSweepResult::default();
        for mut booking in due {
            let id = booking.id;
            if let Err(e) = booking.complete() {
                error!(booking_id = %id, "completion transition failed: {}", e);
                result.errors.push(format!("{}: {}", id, e));
                continue;
            }
            match self.booking_repository.update(booking).await {
                Ok(_) => result.completed += 1,
                Err(e) => {
                    error!(booking_id = %id, "failed to persist completion: {}", e);
                    result.errors.push(format!("{}: {}", id, e));
                }
            }
        }

        if result.completed > 0 {
            info!("completion sweep finished - completed {}", result.completed);
        }
        Ok(result)
    }
}
