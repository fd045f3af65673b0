//! MySQL implementation of the BookingRepository trait.
//!
//! Booking creation is the one operation with a cross-row consistency
//! requirement: the overlap check and the insert must not be separable by
//! a concurrent request for the same car. This implementation serializes
//! per car with a MySQL named lock (`GET_LOCK`), held across both steps.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use ds_core::domain::entities::booking::{Booking, BookingStatus, PaymentStatus};
use ds_core::errors::{DomainError, DomainResult};
use ds_core::repositories::BookingRepository;

/// Seconds to wait for the per-car booking lock before giving up
const LOCK_WAIT_SECONDS: i32 = 5;

const SELECT_COLUMNS: &str = r#"
    SELECT id, renter_id, car_id, start_date, end_date,
           total_price, security_deposit, status,
           contract_signed, contract_signature_url,
           payment_intent_id, payment_status,
           created_at, updated_at
    FROM bookings
"#;

/// MySQL implementation of BookingRepository
pub struct MySqlBookingRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    /// Create a new MySQL booking repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn storage_err(context: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::Storage {
            message: format!("{}: {}", context, e),
        }
    }

    /// Convert database row to Booking entity
    fn row_to_booking(row: &MySqlRow) -> DomainResult<Booking> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::storage_err("failed to get id", e))?;
        let renter_id: String = row
            .try_get("renter_id")
            .map_err(|e| Self::storage_err("failed to get renter_id", e))?;
        let car_id: String = row
            .try_get("car_id")
            .map_err(|e| Self::storage_err("failed to get car_id", e))?;

        let status: String = row
            .try_get("status")
            .map_err(|e| Self::storage_err("failed to get status", e))?;
        let status = BookingStatus::parse(&status)
            .ok_or_else(|| Self::storage_err("invalid status value", &status))?;

        let payment_status: String = row
            .try_get("payment_status")
            .map_err(|e| Self::storage_err("failed to get payment_status", e))?;
        let payment_status = PaymentStatus::parse(&payment_status)
            .ok_or_else(|| Self::storage_err("invalid payment_status value", &payment_status))?;

        Ok(Booking {
            id: Uuid::parse_str(&id).map_err(|e| Self::storage_err("invalid UUID", e))?,
            renter_id: Uuid::parse_str(&renter_id)
                .map_err(|e| Self::storage_err("invalid UUID", e))?,
            car_id: Uuid::parse_str(&car_id).map_err(|e| Self::storage_err("invalid UUID", e))?,
            start_date: row
                .try_get::<NaiveDate, _>("start_date")
                .map_err(|e| Self::storage_err("failed to get start_date", e))?,
            end_date: row
                .try_get::<NaiveDate, _>("end_date")
                .map_err(|e| Self::storage_err("failed to get end_date", e))?,
            total_price: row
                .try_get::<Decimal, _>("total_price")
                .map_err(|e| Self::storage_err("failed to get total_price", e))?,
            security_deposit: row
                .try_get::<Decimal, _>("security_deposit")
                .map_err(|e| Self::storage_err("failed to get security_deposit", e))?,
            status,
            contract_signed: row
                .try_get("contract_signed")
                .map_err(|e| Self::storage_err("failed to get contract_signed", e))?,
            contract_signature_url: row
                .try_get("contract_signature_url")
                .map_err(|e| Self::storage_err("failed to get contract_signature_url", e))?,
            payment_intent_id: row
                .try_get("payment_intent_id")
                .map_err(|e| Self::storage_err("failed to get payment_intent_id", e))?,
            payment_status,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::storage_err("failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::storage_err("failed to get updated_at", e))?,
        })
    }

    /// Overlap check + insert, run while holding the per-car lock
    async fn insert_if_available(
        &self,
        conn: &mut sqlx::MySqlConnection,
        booking: &Booking,
    ) -> DomainResult<()> {
        // Half-open interval test: an existing booking conflicts when it
        // starts before the new one ends and the new one starts before it
        // ends. Back-to-back bookings pass.
        let overlap_query = r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE car_id = ?
                AND status IN ('pending', 'active')
                AND start_date < ?
                AND ? < end_date
            ) as conflicting
        "#;

        let row = sqlx::query(overlap_query)
            .bind(booking.car_id.to_string())
            .bind(booking.end_date)
            .bind(booking.start_date)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| Self::storage_err("availability check failed", e))?;

        let conflicting: i8 = row
            .try_get("conflicting")
            .map_err(|e| Self::storage_err("failed to get overlap result", e))?;
        if conflicting == 1 {
            return Err(DomainError::Unavailable);
        }

        let insert_query = r#"
            INSERT INTO bookings (
                id, renter_id, car_id, start_date, end_date,
                total_price, security_deposit, status,
                contract_signed, contract_signature_url,
                payment_intent_id, payment_status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(insert_query)
            .bind(booking.id.to_string())
            .bind(booking.renter_id.to_string())
            .bind(booking.car_id.to_string())
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_price)
            .bind(booking.security_deposit)
            .bind(booking.status.as_str())
            .bind(booking.contract_signed)
            .bind(&booking.contract_signature_url)
            .bind(&booking.payment_intent_id)
            .bind(booking.payment_status.as_str())
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .execute(&mut *conn)
            .await
            .map_err(|e| Self::storage_err("failed to create booking", e))?;

        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn create(&self, booking: Booking) -> DomainResult<Booking> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| Self::storage_err("failed to acquire connection", e))?;

        // Serialize check-and-insert per car. The same connection must
        // take and release the lock; MySQL named locks are session-scoped.
        let lock_name = format!("booking_car_{}", booking.car_id);
        let row = sqlx::query("SELECT GET_LOCK(?, ?) as locked")
            .bind(&lock_name)
            .bind(LOCK_WAIT_SECONDS)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| Self::storage_err("failed to acquire booking lock", e))?;
        let locked: Option<i64> = row
            .try_get("locked")
            .map_err(|e| Self::storage_err("failed to get lock result", e))?;
        if locked != Some(1) {
            return Err(DomainError::Storage {
                message: format!("timed out waiting for booking lock on car {}", booking.car_id),
            });
        }

        let result = self.insert_if_available(&mut conn, &booking).await;

        // Release regardless of the insert outcome.
        if let Err(e) = sqlx::query("SELECT RELEASE_LOCK(?)")
            .bind(&lock_name)
            .execute(&mut *conn)
            .await
        {
            tracing::warn!("failed to release booking lock {}: {}", lock_name, e);
        }

        result.map(|_| booking)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_booking(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_renter(&self, renter_id: Uuid) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{} WHERE renter_id = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(renter_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn find_by_car(&self, car_id: Uuid) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{} WHERE car_id = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(car_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn find_blocking_by_car(&self, car_id: Uuid) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{} WHERE car_id = ? AND status IN ('pending', 'active')",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(car_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn find_by_payment_intent(&self, intent_id: &str) -> DomainResult<Option<Booking>> {
        let query = format!("{} WHERE payment_intent_id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(intent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_booking(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_ended_active(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{} WHERE status = 'active' AND payment_status = 'paid' AND end_date <= ?",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn update(&self, booking: Booking) -> DomainResult<Booking> {
        // Whole-row write: coupled fields (payment_status, status) always
        // land in the same statement.
        let query = r#"
            UPDATE bookings SET
                start_date = ?,
                end_date = ?,
                total_price = ?,
                security_deposit = ?,
                status = ?,
                contract_signed = ?,
                contract_signature_url = ?,
                payment_intent_id = ?,
                payment_status = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_price)
            .bind(booking.security_deposit)
            .bind(booking.status.as_str())
            .bind(booking.contract_signed)
            .bind(&booking.contract_signature_url)
            .bind(&booking.payment_intent_id)
            .bind(booking.payment_status.as_str())
            .bind(booking.updated_at)
            .bind(booking.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_err("failed to update booking", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Booking"));
        }

        Ok(booking)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_err("failed to delete booking", e))?;

        Ok(result.rows_affected() > 0)
    }
}
