//! Test suite for the payment reconciliation service

mod mocks;
mod service_tests;
