//! Route handlers grouped by resource

pub mod bookings;
pub mod cars;
pub mod host;
pub mod payments;
