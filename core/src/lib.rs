//! # DriveShare Core
//!
//! Core business logic and domain layer for the DriveShare backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the booking
//! availability and lifecycle engine.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Booking, BookingStatus, Car, PaymentStatus};
pub use errors::{DomainError, DomainResult, ErrorResponse};
pub use repositories::{
    BookingRepository, CarRepository, MockBookingRepository, MockCarRepository,
};
pub use services::{
    AvailabilityChecker, BookingCompletionService, BookingService, BookingServiceConfig,
    CompletionSweepResult, IntentStatus, PaymentEvent, PaymentIntent, PaymentOutcome,
    PaymentProvider, PaymentService,
};
