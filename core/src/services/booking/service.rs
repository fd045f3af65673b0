//! Booking lifecycle service implementation

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BookingRepository, CarRepository};

use super::config::BookingServiceConfig;

/// Service owning the booking state machine
///
/// Every operation reads current state from the store, applies a guarded
/// transition on the entity, and writes it back; no booking state is held
/// in memory across calls. Mutation of a booking happens only through the
/// enumerated operations below, never through a generic partial update.
pub struct BookingService<B, C>
where
    B: BookingRepository,
    C: CarRepository,
{
    /// Booking repository for persistence
    booking_repository: Arc<B>,
    /// Car repository for ownership checks
    car_repository: Arc<C>,
    /// Service configuration
    config: BookingServiceConfig,
}

impl<B, C> BookingService<B, C>
where
    B: BookingRepository,
    C: CarRepository,
{
    /// Create a new booking service
    pub fn new(
        booking_repository: Arc<B>,
        car_repository: Arc<C>,
        config: BookingServiceConfig,
    ) -> Self {
        Self {
            booking_repository,
            car_repository,
            config,
        }
    }

    /// Create a booking for a car over a date range
    ///
    /// Validates the request, then delegates to the repository's atomic
    /// check-and-insert. On a date conflict no row is created and
    /// `DomainError::Unavailable` is returned.
    ///
    /// # Arguments
    /// * `renter_id` - Authenticated renter making the request
    /// * `car_id` - Car to book
    /// * `start_date` - First rental day (inclusive)
    /// * `end_date` - Day the rental ends (exclusive)
    /// * `total_price` - Agreed rental price, must be positive
    /// * `security_deposit` - Deposit amount, must be non-negative
    pub async fn create_booking(
        &self,
        renter_id: Uuid,
        car_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_price: Decimal,
        security_deposit: Decimal,
    ) -> DomainResult<Booking> {
        if start_date >= end_date {
            return Err(DomainError::invalid_input(
                "start_date must be before end_date",
            ));
        }
        if total_price <= Decimal::ZERO {
            return Err(DomainError::invalid_input("total_price must be positive"));
        }
        if security_deposit < Decimal::ZERO {
            return Err(DomainError::invalid_input(
                "security_deposit must not be negative",
            ));
        }

        let booking = Booking::new(
            renter_id,
            car_id,
            start_date,
            end_date,
            total_price,
            security_deposit,
        );

        let created = self.booking_repository.create(booking).await?;
        info!(
            booking_id = %created.id,
            car_id = %created.car_id,
            "booking created"
        );
        Ok(created)
    }

    /// Fetch a booking by id
    pub async fn get_booking(&self, id: Uuid) -> DomainResult<Booking> {
        self.booking_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking"))
    }

    /// All bookings created by a renter
    pub async fn list_for_renter(&self, renter_id: Uuid) -> DomainResult<Vec<Booking>> {
        self.booking_repository.find_by_renter(renter_id).await
    }

    /// Pending booking requests across all of a host's cars
    pub async fn pending_requests_for_host(&self, host_id: Uuid) -> DomainResult<Vec<Booking>> {
        let cars = self.car_repository.find_by_owner(host_id).await?;

        let mut requests = Vec::new();
        for car in cars {
            let bookings = self.booking_repository.find_by_car(car.id).await?;
            requests.extend(
                bookings
                    .into_iter()
                    .filter(|b| b.status == BookingStatus::Pending),
            );
        }
        Ok(requests)
    }

    /// Record a signed rental contract on a booking
    ///
    /// Signing does not change the lifecycle status; activation happens via
    /// host acceptance or payment confirmation.
    pub async fn sign_contract(
        &self,
        booking_id: Uuid,
        signature_url: &str,
    ) -> DomainResult<Booking> {
        let mut booking = self.get_booking(booking_id).await?;
        booking.sign_contract(signature_url)?;
        self.booking_repository.update(booking).await
    }

    /// Host accepts a pending booking request
    ///
    /// The acting host must own the booked car. When the service is
    /// configured to require a signed contract, an unsigned booking is
    /// rejected with `Conflict`.
    pub async fn accept_request(
        &self,
        booking_id: Uuid,
        acting_host_id: Uuid,
    ) -> DomainResult<Booking> {
        let mut booking = self.get_booking(booking_id).await?;
        self.verify_car_ownership(&booking, acting_host_id).await?;

        if self.config.require_signed_contract && !booking.contract_signed {
            return Err(DomainError::conflict(
                "contract must be signed before the request can be accepted",
            ));
        }

        booking.activate()?;
        let updated = self.booking_repository.update(booking).await?;
        info!(booking_id = %updated.id, "booking request accepted");
        Ok(updated)
    }

    /// Host rejects a pending booking request
    pub async fn reject_request(
        &self,
        booking_id: Uuid,
        acting_host_id: Uuid,
    ) -> DomainResult<Booking> {
        let mut booking = self.get_booking(booking_id).await?;
        self.verify_car_ownership(&booking, acting_host_id).await?;

        if booking.status != BookingStatus::Pending {
            return Err(DomainError::conflict(format!(
                "cannot reject booking in status '{}'",
                booking.status.as_str()
            )));
        }

        booking.cancel()?;
        let updated = self.booking_repository.update(booking).await?;
        info!(booking_id = %updated.id, "booking request rejected");
        Ok(updated)
    }

    /// Cancel a booking
    ///
    /// Permitted only from `pending` or `active`; terminal bookings return
    /// `Conflict`. The row is kept as a cancelled record rather than
    /// deleted, so the car's booking history survives.
    pub async fn cancel_booking(&self, booking_id: Uuid) -> DomainResult<Booking> {
        let mut booking = self.get_booking(booking_id).await?;
        booking.cancel()?;
        let updated = self.booking_repository.update(booking).await?;
        info!(booking_id = %updated.id, "booking cancelled");
        Ok(updated)
    }

    /// Check that the acting host owns the booking's car
    async fn verify_car_ownership(
        &self,
        booking: &Booking,
        acting_host_id: Uuid,
    ) -> DomainResult<()> {
        let car = self
            .car_repository
            .find_by_id(booking.car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car"))?;

        if !car.is_owned_by(acting_host_id) {
            warn!(
                booking_id = %booking.id,
                car_id = %booking.car_id,
                "host acted on a booking for a car they do not own"
            );
            return Err(DomainError::Forbidden);
        }
        Ok(())
    }
}
