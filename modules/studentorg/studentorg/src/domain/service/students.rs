use chrono::Utc;
use studentorg_sdk::{DeleteSummary, EntityKind, NewStudent, Page, Student, StudentRow};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{Service, ensure_deletable};
use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;
use crate::domain::validation::{PERSON_NAME_MAX, STUDENT_ID_MAX, Violations};

struct ValidStudent {
    student_id: String,
    lastname: String,
    firstname: String,
    middlename: Option<String>,
    program_id: Uuid,
}

impl Service {
    #[instrument(skip(self, query))]
    pub async fn list_students(&self, query: &ListQuery) -> Result<Page<StudentRow>, DomainError> {
        debug!(search = ?query.search, "Listing students");
        self.students.list_page(query).await
    }

    #[instrument(skip(self), fields(student_pk = %id))]
    pub async fn get_student(&self, id: Uuid) -> Result<Student, DomainError> {
        self.students
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Student, id))
    }

    #[instrument(skip(self, input), fields(program_id = %input.program_id))]
    pub async fn create_student(&self, input: NewStudent) -> Result<Student, DomainError> {
        let valid = self.validate_student(&input, None).await?;

        let now = Utc::now();
        let student = self
            .students
            .create(Student {
                id: Uuid::now_v7(),
                student_id: valid.student_id,
                lastname: valid.lastname,
                firstname: valid.firstname,
                middlename: valid.middlename,
                program_id: valid.program_id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(student_pk = %student.id, student_id = %student.student_id, "Student created");
        Ok(student)
    }

    #[instrument(skip(self, input), fields(student_pk = %id))]
    pub async fn update_student(&self, id: Uuid, input: NewStudent) -> Result<Student, DomainError> {
        let existing = self.get_student(id).await?;
        let valid = self.validate_student(&input, Some(id)).await?;

        let student = self
            .students
            .update(Student {
                student_id: valid.student_id,
                lastname: valid.lastname,
                firstname: valid.firstname,
                middlename: valid.middlename,
                program_id: valid.program_id,
                updated_at: Utc::now(),
                ..existing
            })
            .await?;

        info!(student_pk = %id, "Student updated");
        Ok(student)
    }

    #[instrument(skip(self), fields(student_pk = %id))]
    pub async fn student_delete_summary(&self, id: Uuid) -> Result<DeleteSummary, DomainError> {
        let student = self.get_student(id).await?;
        let blocking = self.students.dependents(id).await?;
        Ok(DeleteSummary {
            entity: EntityKind::Student,
            id,
            label: format!(
                "{}, {} ({})",
                student.lastname, student.firstname, student.student_id
            ),
            blocking,
        })
    }

    #[instrument(skip(self), fields(student_pk = %id))]
    pub async fn delete_student(&self, id: Uuid) -> Result<(), DomainError> {
        ensure_deletable(self.student_delete_summary(id).await?)?;
        if !self.students.delete(id).await? {
            return Err(DomainError::not_found(EntityKind::Student, id));
        }

        info!(student_pk = %id, "Student deleted");
        Ok(())
    }

    /// `current` is the row being updated, excluded from the uniqueness check.
    async fn validate_student(
        &self,
        input: &NewStudent,
        current: Option<Uuid>,
    ) -> Result<ValidStudent, DomainError> {
        let mut violations = Violations::new();
        let student_id = violations.required_text("student_id", &input.student_id, STUDENT_ID_MAX);
        let lastname = violations.required_text("lastname", &input.lastname, PERSON_NAME_MAX);
        let firstname = violations.required_text("firstname", &input.firstname, PERSON_NAME_MAX);
        let middlename =
            violations.optional_text("middlename", input.middlename.as_deref(), PERSON_NAME_MAX);

        if !student_id.is_empty() {
            let holder = self.students.find_by_student_id(&student_id).await?;
            if holder.is_some_and(|other| Some(other.id) != current) {
                violations.push("student_id", "a student with this student_id already exists");
            }
        }
        if !self.programs.exists(input.program_id).await? {
            violations.push("program_id", "program does not exist");
        }
        violations.finish()?;

        Ok(ValidStudent {
            student_id,
            lastname,
            firstname,
            middlename,
            program_id: input.program_id,
        })
    }
}
