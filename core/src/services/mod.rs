//! Business services containing domain logic and use cases.

pub mod booking;
pub mod payment;

// Re-export commonly used types
pub use booking::{
    AvailabilityChecker, BookingCompletionService, BookingService, BookingServiceConfig,
    CompletionSweepResult,
};
pub use payment::{
    IntentStatus, PaymentEvent, PaymentIntent, PaymentOutcome, PaymentProvider, PaymentService,
};
