use async_trait::async_trait;
use chrono::NaiveDate;
use studentorg_sdk::{OrgMember, OrgMemberRow, Page};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::query::{ListQuery, MemberSort};

/// Repository trait for organization membership persistence operations.
#[async_trait]
pub trait OrgMembersRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<OrgMember>, DomainError>;

    /// List memberships matching the student's names, the organization name,
    /// or the year/month/day of the join date.
    async fn list_page(
        &self,
        query: &ListQuery,
        sort: MemberSort,
    ) -> Result<Page<OrgMemberRow>, DomainError>;

    async fn create(&self, member: OrgMember) -> Result<OrgMember, DomainError>;

    async fn update(&self, member: OrgMember) -> Result<OrgMember, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Distinct students with a membership joined in `[from, until)`.
    async fn count_distinct_students_joined(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<u64, DomainError>;
}
