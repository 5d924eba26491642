use chrono::Utc;
use studentorg_sdk::{DeleteSummary, EntityKind, NewProgram, Page, Program, ProgramRow};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{Service, ensure_deletable};
use crate::domain::error::DomainError;
use crate::domain::query::{ListQuery, ProgramSort};
use crate::domain::validation::{PROG_NAME_MAX, Violations};

impl Service {
    #[instrument(skip(self, query))]
    pub async fn list_programs(
        &self,
        query: &ListQuery,
        sort: ProgramSort,
    ) -> Result<Page<ProgramRow>, DomainError> {
        debug!(search = ?query.search, ?sort, "Listing programs");
        self.programs.list_page(query, sort).await
    }

    #[instrument(skip(self), fields(program_id = %id))]
    pub async fn get_program(&self, id: Uuid) -> Result<Program, DomainError> {
        self.programs
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Program, id))
    }

    #[instrument(skip(self, input), fields(college_id = %input.college_id))]
    pub async fn create_program(&self, input: NewProgram) -> Result<Program, DomainError> {
        let (prog_name, college_id) = self.validate_program(&input).await?;

        let now = Utc::now();
        let program = self
            .programs
            .create(Program {
                id: Uuid::now_v7(),
                prog_name,
                college_id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(program_id = %program.id, "Program created");
        Ok(program)
    }

    #[instrument(skip(self, input), fields(program_id = %id))]
    pub async fn update_program(&self, id: Uuid, input: NewProgram) -> Result<Program, DomainError> {
        let existing = self.get_program(id).await?;
        let (prog_name, college_id) = self.validate_program(&input).await?;

        let program = self
            .programs
            .update(Program {
                prog_name,
                college_id,
                updated_at: Utc::now(),
                ..existing
            })
            .await?;

        info!(program_id = %id, "Program updated");
        Ok(program)
    }

    #[instrument(skip(self), fields(program_id = %id))]
    pub async fn program_delete_summary(&self, id: Uuid) -> Result<DeleteSummary, DomainError> {
        let program = self.get_program(id).await?;
        let blocking = self.programs.dependents(id).await?;
        Ok(DeleteSummary {
            entity: EntityKind::Program,
            id,
            label: program.prog_name,
            blocking,
        })
    }

    #[instrument(skip(self), fields(program_id = %id))]
    pub async fn delete_program(&self, id: Uuid) -> Result<(), DomainError> {
        ensure_deletable(self.program_delete_summary(id).await?)?;
        if !self.programs.delete(id).await? {
            return Err(DomainError::not_found(EntityKind::Program, id));
        }

        info!(program_id = %id, "Program deleted");
        Ok(())
    }

    async fn validate_program(&self, input: &NewProgram) -> Result<(String, Uuid), DomainError> {
        let mut violations = Violations::new();
        let prog_name = violations.required_text("prog_name", &input.prog_name, PROG_NAME_MAX);
        if !self.colleges.exists(input.college_id).await? {
            violations.push("college_id", "college does not exist");
        }
        violations.finish()?;
        Ok((prog_name, input.college_id))
    }
}
