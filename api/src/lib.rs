//! # DriveShare API
//!
//! HTTP layer for the booking and payment services. Handlers stay thin:
//! they authenticate, deserialize and validate the request, call the
//! matching core service, and translate `DomainError` to an HTTP status.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
