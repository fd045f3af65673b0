//! HTTP middleware components

pub mod auth;
pub mod cors;
