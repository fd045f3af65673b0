//! Database access layer

pub mod connection;
pub mod mysql;
