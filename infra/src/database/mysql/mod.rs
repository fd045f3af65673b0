//! MySQL repository implementations

mod booking_repository_impl;
mod car_repository_impl;

pub use booking_repository_impl::MySqlBookingRepository;
pub use car_repository_impl::MySqlCarRepository;
