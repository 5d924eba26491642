use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use studentorg_sdk::{Dependents, EntityKind, Page, Student, StudentRow};
use uuid::Uuid;

use super::db::{db_err, delete_err, is_unique_violation, update_err, write_err};
use super::entity::{org_member, program, student};
use super::mapper::{student_insert, student_update};
use super::pagination::fetch_page;
use super::search::{contains_pattern, folded_contains};
use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;
use crate::domain::repos::StudentsRepository;

#[derive(Debug, FromQueryResult)]
struct StudentListing {
    id: Uuid,
    student_id: String,
    lastname: String,
    firstname: String,
    middlename: Option<String>,
    program_id: Uuid,
    prog_name: String,
}

impl From<StudentListing> for StudentRow {
    fn from(r: StudentListing) -> Self {
        Self {
            id: r.id,
            student_id: r.student_id,
            lastname: r.lastname,
            firstname: r.firstname,
            middlename: r.middlename,
            program_id: r.program_id,
            prog_name: r.prog_name,
        }
    }
}

/// A concurrent insert can still hit the unique index after validation.
fn student_write_err(e: DbErr) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::validation("student_id", "a student with this student_id already exists")
    } else {
        write_err(e, "program_id")
    }
}

/// `SeaORM` implementation of `StudentsRepository`.
pub struct OrmStudentsRepository {
    conn: DatabaseConnection,
}

impl OrmStudentsRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl StudentsRepository for OrmStudentsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Student>, DomainError> {
        let found = student::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Student>, DomainError> {
        let found = student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list_page(&self, query: &ListQuery) -> Result<Page<StudentRow>, DomainError> {
        let mut select = student::Entity::find()
            .select_only()
            .column(student::Column::Id)
            .column(student::Column::StudentId)
            .column(student::Column::Lastname)
            .column(student::Column::Firstname)
            .column(student::Column::Middlename)
            .column(student::Column::ProgramId)
            .column_as(program::Column::ProgName, "prog_name")
            .join(JoinType::InnerJoin, student::Relation::Program.def());

        if let Some(term) = &query.search {
            let pattern = contains_pattern(term);
            select = select.filter(
                Condition::any()
                    .add(folded_contains(
                        (student::Entity, student::Column::LastnameFolded),
                        &pattern,
                    ))
                    .add(folded_contains(
                        (student::Entity, student::Column::FirstnameFolded),
                        &pattern,
                    ))
                    .add(folded_contains(
                        (student::Entity, student::Column::MiddlenameFolded),
                        &pattern,
                    ))
                    .add(folded_contains(
                        (student::Entity, student::Column::StudentIdFolded),
                        &pattern,
                    ))
                    .add(folded_contains(
                        (program::Entity, program::Column::ProgNameFolded),
                        &pattern,
                    )),
            );
        }

        let select = select
            .order_by_asc(student::Column::Lastname)
            .order_by_asc(student::Column::Firstname)
            .order_by_asc(student::Column::Id)
            .into_model::<StudentListing>();

        let page = fetch_page(&self.conn, select, query.page)
            .await
            .map_err(db_err)?;
        Ok(page.map_items(Into::into))
    }

    async fn create(&self, student: Student) -> Result<Student, DomainError> {
        let model = student_insert(student)
            .insert(&self.conn)
            .await
            .map_err(student_write_err)?;
        Ok(model.into())
    }

    async fn update(&self, student: Student) -> Result<Student, DomainError> {
        let id = student.id;
        let model = student_update(student)
            .update(&self.conn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => update_err(e, EntityKind::Student, id, "program_id"),
                other => student_write_err(other),
            })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = student::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(|e| delete_err(e, EntityKind::Student, id))?;
        Ok(res.rows_affected > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count = student::Entity::find_by_id(id)
            .count(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        let memberships = org_member::Entity::find()
            .filter(org_member::Column::StudentId.eq(id))
            .count(&self.conn)
            .await
            .map_err(db_err)?;

        Ok((memberships > 0)
            .then_some(Dependents {
                relation: "memberships",
                count: memberships,
            })
            .into_iter()
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        student::Entity::find()
            .count(&self.conn)
            .await
            .map_err(db_err)
    }
}
