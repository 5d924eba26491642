use async_trait::async_trait;
use studentorg_sdk::{Dependents, Organization, OrganizationRow, Page};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;

/// Repository trait for Organization persistence operations.
#[async_trait]
pub trait OrganizationsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Organization>, DomainError>;

    /// List organizations matching name, description or college name,
    /// ordered by college name then organization name.
    async fn list_page(&self, query: &ListQuery) -> Result<Page<OrganizationRow>, DomainError>;

    async fn create(&self, organization: Organization) -> Result<Organization, DomainError>;

    async fn update(&self, organization: Organization) -> Result<Organization, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Memberships still pointing at the organization (non-zero only).
    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
