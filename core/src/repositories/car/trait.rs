//! Car repository trait.
//!
//! This core does not own Car records; it only reads them for ownership
//! checks in host accept/reject and for listing a host's pending requests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::car::Car;
use crate::errors::DomainResult;

/// Read-only repository interface for Car lookups
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Find a car by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Car>>;

    /// All cars listed by an owner
    async fn find_by_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Car>>;
}
