//! Car availability endpoint

pub mod availability;
