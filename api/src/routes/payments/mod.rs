//! Payment endpoints
//!
//! Intent creation and confirmation are called by the frontend; the
//! webhook is called by the payment processor and authenticates by
//! signature instead of JWT.

pub mod confirm;
pub mod intent;
pub mod webhook;
