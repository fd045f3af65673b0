//! Request and response data transfer objects

pub mod booking;
pub mod payment;
