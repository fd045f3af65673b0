//! Repository interfaces for booking and car persistence.

pub mod booking;
pub mod car;

pub use booking::{BookingRepository, MockBookingRepository};
pub use car::{CarRepository, MockCarRepository};
