use chrono::Utc;
use studentorg_sdk::{College, DeleteSummary, EntityKind, NewCollege, Page};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{Service, ensure_deletable};
use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;
use crate::domain::validation::{COLLEGE_NAME_MAX, Violations};

impl Service {
    #[instrument(skip(self, query))]
    pub async fn list_colleges(&self, query: &ListQuery) -> Result<Page<College>, DomainError> {
        debug!(search = ?query.search, "Listing colleges");
        self.colleges.list_page(query).await
    }

    #[instrument(skip(self), fields(college_id = %id))]
    pub async fn get_college(&self, id: Uuid) -> Result<College, DomainError> {
        self.colleges
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::College, id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_college(&self, input: NewCollege) -> Result<College, DomainError> {
        let mut violations = Violations::new();
        let college_name =
            violations.required_text("college_name", &input.college_name, COLLEGE_NAME_MAX);
        violations.finish()?;

        let now = Utc::now();
        let college = self
            .colleges
            .create(College {
                id: Uuid::now_v7(),
                college_name,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(college_id = %college.id, "College created");
        Ok(college)
    }

    #[instrument(skip(self, input), fields(college_id = %id))]
    pub async fn update_college(&self, id: Uuid, input: NewCollege) -> Result<College, DomainError> {
        let existing = self.get_college(id).await?;

        let mut violations = Violations::new();
        let college_name =
            violations.required_text("college_name", &input.college_name, COLLEGE_NAME_MAX);
        violations.finish()?;

        let college = self
            .colleges
            .update(College {
                college_name,
                updated_at: Utc::now(),
                ..existing
            })
            .await?;

        info!(college_id = %id, "College updated");
        Ok(college)
    }

    #[instrument(skip(self), fields(college_id = %id))]
    pub async fn college_delete_summary(&self, id: Uuid) -> Result<DeleteSummary, DomainError> {
        let college = self.get_college(id).await?;
        let blocking = self.colleges.dependents(id).await?;
        Ok(DeleteSummary {
            entity: EntityKind::College,
            id,
            label: college.college_name,
            blocking,
        })
    }

    #[instrument(skip(self), fields(college_id = %id))]
    pub async fn delete_college(&self, id: Uuid) -> Result<(), DomainError> {
        ensure_deletable(self.college_delete_summary(id).await?)?;
        if !self.colleges.delete(id).await? {
            return Err(DomainError::not_found(EntityKind::College, id));
        }

        info!(college_id = %id, "College deleted");
        Ok(())
    }
}
