//! Common type definitions shared across server crates

mod response;

pub use response::ApiResponse;
