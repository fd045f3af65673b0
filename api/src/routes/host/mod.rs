//! Host-side booking request endpoints

pub mod accept;
pub mod reject;
pub mod requests;
