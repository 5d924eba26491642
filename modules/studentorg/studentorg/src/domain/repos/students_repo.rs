use async_trait::async_trait;
use studentorg_sdk::{Dependents, Page, Student, StudentRow};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;

/// Repository trait for Student persistence operations.
#[async_trait]
pub trait StudentsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Student>, DomainError>;

    /// Find a student by the school-issued `student_id`.
    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Student>, DomainError>;

    /// List students matching any name, the `student_id` or the program name.
    async fn list_page(&self, query: &ListQuery) -> Result<Page<StudentRow>, DomainError>;

    /// Insert a student. A `student_id` collision is a validation error.
    async fn create(&self, student: Student) -> Result<Student, DomainError>;

    async fn update(&self, student: Student) -> Result<Student, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Memberships still held by the student (non-zero only).
    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
