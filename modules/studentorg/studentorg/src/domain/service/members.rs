use chrono::{NaiveDate, Utc};
use studentorg_sdk::{DeleteSummary, EntityKind, NewOrgMember, OrgMember, OrgMemberRow, Page};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::Service;
use crate::domain::error::DomainError;
use crate::domain::query::{ListQuery, MemberSort};
use crate::domain::validation::{REQUIRED, Violations};

impl Service {
    #[instrument(skip(self, query))]
    pub async fn list_members(
        &self,
        query: &ListQuery,
        sort: MemberSort,
    ) -> Result<Page<OrgMemberRow>, DomainError> {
        debug!(search = ?query.search, ?sort, "Listing organization members");
        self.members.list_page(query, sort).await
    }

    #[instrument(skip(self), fields(member_id = %id))]
    pub async fn get_member(&self, id: Uuid) -> Result<OrgMember, DomainError> {
        self.members
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::OrgMember, id))
    }

    #[instrument(
        skip(self, input),
        fields(student_pk = %input.student_id, organization_id = %input.organization_id)
    )]
    pub async fn create_member(&self, input: NewOrgMember) -> Result<OrgMember, DomainError> {
        let date_joined = self.validate_member(&input).await?;

        let now = Utc::now();
        let member = self
            .members
            .create(OrgMember {
                id: Uuid::now_v7(),
                student_id: input.student_id,
                organization_id: input.organization_id,
                date_joined,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(member_id = %member.id, "Organization member created");
        Ok(member)
    }

    #[instrument(skip(self, input), fields(member_id = %id))]
    pub async fn update_member(
        &self,
        id: Uuid,
        input: NewOrgMember,
    ) -> Result<OrgMember, DomainError> {
        let existing = self.get_member(id).await?;
        let date_joined = self.validate_member(&input).await?;

        let member = self
            .members
            .update(OrgMember {
                student_id: input.student_id,
                organization_id: input.organization_id,
                date_joined,
                updated_at: Utc::now(),
                ..existing
            })
            .await?;

        info!(member_id = %id, "Organization member updated");
        Ok(member)
    }

    /// Memberships have no dependents, so the summary never blocks.
    #[instrument(skip(self), fields(member_id = %id))]
    pub async fn member_delete_summary(&self, id: Uuid) -> Result<DeleteSummary, DomainError> {
        let member = self.get_member(id).await?;
        let student = self.students.get(member.student_id).await?.map_or_else(
            || member.student_id.to_string(),
            |s| format!("{}, {}", s.lastname, s.firstname),
        );
        let organization = self
            .organizations
            .get(member.organization_id)
            .await?
            .map_or_else(|| member.organization_id.to_string(), |o| o.name);
        Ok(DeleteSummary {
            entity: EntityKind::OrgMember,
            id,
            label: format!("{student} in {organization} since {}", member.date_joined),
            blocking: Vec::new(),
        })
    }

    #[instrument(skip(self), fields(member_id = %id))]
    pub async fn delete_member(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.members.delete(id).await? {
            return Err(DomainError::not_found(EntityKind::OrgMember, id));
        }

        info!(member_id = %id, "Organization member deleted");
        Ok(())
    }

    /// Returns the validated join date.
    async fn validate_member(&self, input: &NewOrgMember) -> Result<NaiveDate, DomainError> {
        let mut violations = Violations::new();
        if !self.students.exists(input.student_id).await? {
            violations.push("student_id", "student does not exist");
        }
        if !self.organizations.exists(input.organization_id).await? {
            violations.push("organization_id", "organization does not exist");
        }
        match input.date_joined {
            Some(date) => violations.not_in_future("date_joined", date, Utc::now().date_naive()),
            None => violations.push("date_joined", REQUIRED),
        }
        violations.finish()?;
        input
            .date_joined
            .ok_or_else(|| DomainError::validation("date_joined", REQUIRED))
    }
}
