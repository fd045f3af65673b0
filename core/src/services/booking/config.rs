//! Booking service configuration

/// Configuration for the booking lifecycle service
#[derive(Debug, Clone)]
pub struct BookingServiceConfig {
    /// Whether host acceptance requires a signed rental contract
    ///
    /// Payment reconciliation is exempt: once the processor reports the
    /// charge as succeeded, the booking activates regardless of contract
    /// state.
    pub require_signed_contract: bool,
}

impl Default for BookingServiceConfig {
    fn default() -> Self {
        Self {
            require_signed_contract: true,
        }
    }
}
