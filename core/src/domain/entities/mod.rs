//! Domain entities representing core business objects.

pub mod booking;
pub mod car;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use car::Car;
