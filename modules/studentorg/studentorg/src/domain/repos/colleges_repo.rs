use async_trait::async_trait;
use studentorg_sdk::{College, Dependents, Page};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;

/// Repository trait for College persistence operations.
#[async_trait]
pub trait CollegesRepository: Send + Sync {
    /// Find a college by ID.
    async fn get(&self, id: Uuid) -> Result<Option<College>, DomainError>;

    /// List colleges whose name contains the search term, ordered by name.
    async fn list_page(&self, query: &ListQuery) -> Result<Page<College>, DomainError>;

    async fn create(&self, college: College) -> Result<College, DomainError>;

    async fn update(&self, college: College) -> Result<College, DomainError>;

    /// Delete a college by ID. Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Programs and organizations still owned by the college (non-zero only).
    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError>;
}
