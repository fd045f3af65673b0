//! Booking lifecycle module
//!
//! This module provides the booking availability and lifecycle engine:
//! - Date-range availability checking
//! - Booking creation with an atomic check-and-insert
//! - Guarded state transitions (sign, accept, reject, cancel)
//! - Scheduled completion of ended rentals

pub mod availability;
mod completion;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use availability::AvailabilityChecker;
pub use completion::{BookingCompletionService, CompletionSweepResult};
pub use config::BookingServiceConfig;
pub use service::BookingService;
