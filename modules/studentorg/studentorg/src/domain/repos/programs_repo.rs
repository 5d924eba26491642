use async_trait::async_trait;
use studentorg_sdk::{Dependents, Page, Program, ProgramRow};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::query::{ListQuery, ProgramSort};

/// Repository trait for Program persistence operations.
#[async_trait]
pub trait ProgramsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Program>, DomainError>;

    /// List programs matching the program or college name.
    async fn list_page(
        &self,
        query: &ListQuery,
        sort: ProgramSort,
    ) -> Result<Page<ProgramRow>, DomainError>;

    async fn create(&self, program: Program) -> Result<Program, DomainError>;

    async fn update(&self, program: Program) -> Result<Program, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Students still enrolled in the program (non-zero only).
    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
