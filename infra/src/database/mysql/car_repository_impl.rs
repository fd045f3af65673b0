//! MySQL implementation of the CarRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use ds_core::domain::entities::car::Car;
use ds_core::errors::{DomainError, DomainResult};
use ds_core::repositories::CarRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, make, model, price_per_day,
           is_available, created_at, updated_at
    FROM cars
"#;

/// MySQL implementation of CarRepository
pub struct MySqlCarRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCarRepository {
    /// Create a new MySQL car repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn storage_err(context: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::Storage {
            message: format!("{}: {}", context, e),
        }
    }

    /// Convert database row to Car entity
    fn row_to_car(row: &MySqlRow) -> DomainResult<Car> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::storage_err("failed to get id", e))?;
        let owner_id: String = row
            .try_get("owner_id")
            .map_err(|e| Self::storage_err("failed to get owner_id", e))?;

        Ok(Car {
            id: Uuid::parse_str(&id).map_err(|e| Self::storage_err("invalid UUID", e))?,
            owner_id: Uuid::parse_str(&owner_id)
                .map_err(|e| Self::storage_err("invalid UUID", e))?,
            make: row
                .try_get("make")
                .map_err(|e| Self::storage_err("failed to get make", e))?,
            model: row
                .try_get("model")
                .map_err(|e| Self::storage_err("failed to get model", e))?,
            price_per_day: row
                .try_get::<Decimal, _>("price_per_day")
                .map_err(|e| Self::storage_err("failed to get price_per_day", e))?,
            is_available: row
                .try_get("is_available")
                .map_err(|e| Self::storage_err("failed to get is_available", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::storage_err("failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::storage_err("failed to get updated_at", e))?,
        })
    }
}

#[async_trait]
impl CarRepository for MySqlCarRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Car>> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_car(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Car>> {
        let query = format!(
            "{} WHERE owner_id = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_err("database query failed", e))?;

        rows.iter().map(Self::row_to_car).collect()
    }
}
