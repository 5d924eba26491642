use chrono::Utc;
use studentorg_sdk::{DeleteSummary, EntityKind, NewOrganization, Organization, OrganizationRow, Page};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{Service, ensure_deletable};
use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;
use crate::domain::validation::{ORG_DESCRIPTION_MAX, ORG_NAME_MAX, Violations};

struct ValidOrganization {
    name: String,
    description: String,
    college_id: Uuid,
}

impl Service {
    #[instrument(skip(self, query))]
    pub async fn list_organizations(
        &self,
        query: &ListQuery,
    ) -> Result<Page<OrganizationRow>, DomainError> {
        debug!(search = ?query.search, "Listing organizations");
        self.organizations.list_page(query).await
    }

    #[instrument(skip(self), fields(organization_id = %id))]
    pub async fn get_organization(&self, id: Uuid) -> Result<Organization, DomainError> {
        self.organizations
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Organization, id))
    }

    #[instrument(skip(self, input), fields(college_id = %input.college_id))]
    pub async fn create_organization(
        &self,
        input: NewOrganization,
    ) -> Result<Organization, DomainError> {
        let valid = self.validate_organization(&input).await?;

        let now = Utc::now();
        let organization = self
            .organizations
            .create(Organization {
                id: Uuid::now_v7(),
                name: valid.name,
                description: valid.description,
                college_id: valid.college_id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(organization_id = %organization.id, "Organization created");
        Ok(organization)
    }

    #[instrument(skip(self, input), fields(organization_id = %id))]
    pub async fn update_organization(
        &self,
        id: Uuid,
        input: NewOrganization,
    ) -> Result<Organization, DomainError> {
        let existing = self.get_organization(id).await?;
        let valid = self.validate_organization(&input).await?;

        let organization = self
            .organizations
            .update(Organization {
                name: valid.name,
                description: valid.description,
                college_id: valid.college_id,
                updated_at: Utc::now(),
                ..existing
            })
            .await?;

        info!(organization_id = %id, "Organization updated");
        Ok(organization)
    }

    #[instrument(skip(self), fields(organization_id = %id))]
    pub async fn organization_delete_summary(
        &self,
        id: Uuid,
    ) -> Result<DeleteSummary, DomainError> {
        let organization = self.get_organization(id).await?;
        let blocking = self.organizations.dependents(id).await?;
        Ok(DeleteSummary {
            entity: EntityKind::Organization,
            id,
            label: organization.name,
            blocking,
        })
    }

    #[instrument(skip(self), fields(organization_id = %id))]
    pub async fn delete_organization(&self, id: Uuid) -> Result<(), DomainError> {
        ensure_deletable(self.organization_delete_summary(id).await?)?;
        if !self.organizations.delete(id).await? {
            return Err(DomainError::not_found(EntityKind::Organization, id));
        }

        info!(organization_id = %id, "Organization deleted");
        Ok(())
    }

    async fn validate_organization(
        &self,
        input: &NewOrganization,
    ) -> Result<ValidOrganization, DomainError> {
        let mut violations = Violations::new();
        let name = violations.required_text("name", &input.name, ORG_NAME_MAX);
        let description =
            violations.required_text("description", &input.description, ORG_DESCRIPTION_MAX);
        if !self.colleges.exists(input.college_id).await? {
            violations.push("college_id", "college does not exist");
        }
        violations.finish()?;
        Ok(ValidOrganization {
            name,
            description,
            college_id: input.college_id,
        })
    }
}
