//! Request handling helpers

pub mod error;
