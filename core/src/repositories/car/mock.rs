//! Mock implementation of CarRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::car::Car;
use crate::errors::DomainResult;

use super::trait_::CarRepository;

/// Mock car repository for testing
pub struct MockCarRepository {
    cars: Arc<RwLock<HashMap<Uuid, Car>>>,
}

impl MockCarRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            cars: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository seeded with a car
    pub async fn insert(&self, car: Car) {
        self.cars.write().await.insert(car.id, car);
    }
}

impl Default for MockCarRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarRepository for MockCarRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Car>> {
        let cars = self.cars.read().await;
        Ok(cars.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Car>> {
        let cars = self.cars.read().await;
        Ok(cars
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
