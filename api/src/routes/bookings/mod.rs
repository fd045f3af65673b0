//! Booking endpoints
//!
//! - Creating a booking request
//! - Fetching a single booking or the caller's booking history
//! - Signing the rental contract
//! - Cancelling a booking

pub mod cancel;
pub mod create;
pub mod get;
pub mod my_bookings;
pub mod sign_contract;
