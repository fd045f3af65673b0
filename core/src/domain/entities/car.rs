//! Car entity referenced by bookings.
//!
//! Cars are owned by the listing subsystem; this core only reads them for
//! ownership checks and host request listings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A listed car available for rental
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier for the car
    pub id: Uuid,

    /// Host who owns the car
    pub owner_id: Uuid,

    /// Manufacturer
    pub make: String,

    /// Model name
    pub model: String,

    /// Daily rental price
    pub price_per_day: Decimal,

    /// Whether the host currently lists the car as rentable
    pub is_available: bool,

    /// Timestamp when the listing was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the listing was last updated
    pub updated_at: DateTime<Utc>,
}

impl Car {
    /// Creates a new Car listing
    pub fn new(
        owner_id: Uuid,
        make: impl Into<String>,
        model: impl Into<String>,
        price_per_day: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            make: make.into(),
            model: model.into(),
            price_per_day,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the given user owns this car
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_car() {
        let owner = Uuid::new_v4();
        let car = Car::new(owner, "Toyota", "Camry", Decimal::from(50));
        assert!(car.is_available);
        assert!(car.is_owned_by(owner));
        assert!(!car.is_owned_by(Uuid::new_v4()));
    }
}
