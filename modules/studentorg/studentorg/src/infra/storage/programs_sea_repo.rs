use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use studentorg_sdk::{Dependents, EntityKind, Page, Program, ProgramRow};
use uuid::Uuid;

use super::db::{db_err, delete_err, update_err, write_err};
use super::entity::{college, program, student};
use super::mapper::{program_insert, program_update};
use super::pagination::fetch_page;
use super::search::{contains_pattern, folded_contains};
use crate::domain::error::DomainError;
use crate::domain::query::{ListQuery, ProgramSort};
use crate::domain::repos::ProgramsRepository;

#[derive(Debug, FromQueryResult)]
struct ProgramListing {
    id: Uuid,
    prog_name: String,
    college_id: Uuid,
    college_name: String,
}

impl From<ProgramListing> for ProgramRow {
    fn from(r: ProgramListing) -> Self {
        Self {
            id: r.id,
            prog_name: r.prog_name,
            college_id: r.college_id,
            college_name: r.college_name,
        }
    }
}

/// `SeaORM` implementation of `ProgramsRepository`.
pub struct OrmProgramsRepository {
    conn: DatabaseConnection,
}

impl OrmProgramsRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ProgramsRepository for OrmProgramsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Program>, DomainError> {
        let found = program::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list_page(
        &self,
        query: &ListQuery,
        sort: ProgramSort,
    ) -> Result<Page<ProgramRow>, DomainError> {
        let mut select = program::Entity::find()
            .select_only()
            .column(program::Column::Id)
            .column(program::Column::ProgName)
            .column(program::Column::CollegeId)
            .column_as(college::Column::CollegeName, "college_name")
            .join(JoinType::InnerJoin, program::Relation::College.def());

        if let Some(term) = &query.search {
            let pattern = contains_pattern(term);
            select = select.filter(
                Condition::any()
                    .add(folded_contains(
                        (program::Entity, program::Column::ProgNameFolded),
                        &pattern,
                    ))
                    .add(folded_contains(
                        (college::Entity, college::Column::CollegeNameFolded),
                        &pattern,
                    )),
            );
        }

        select = match sort {
            ProgramSort::ProgName => select.order_by_asc(program::Column::ProgName),
            ProgramSort::CollegeName => select.order_by_asc(college::Column::CollegeName),
        };
        let select = select
            .order_by_asc(program::Column::Id)
            .into_model::<ProgramListing>();

        let page = fetch_page(&self.conn, select, query.page)
            .await
            .map_err(db_err)?;
        Ok(page.map_items(Into::into))
    }

    async fn create(&self, program: Program) -> Result<Program, DomainError> {
        let model = program_insert(program)
            .insert(&self.conn)
            .await
            .map_err(|e| write_err(e, "college_id"))?;
        Ok(model.into())
    }

    async fn update(&self, program: Program) -> Result<Program, DomainError> {
        let id = program.id;
        let model = program_update(program)
            .update(&self.conn)
            .await
            .map_err(|e| update_err(e, EntityKind::Program, id, "college_id"))?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = program::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(|e| delete_err(e, EntityKind::Program, id))?;
        Ok(res.rows_affected > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count = program::Entity::find_by_id(id)
            .count(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        let students = student::Entity::find()
            .filter(student::Column::ProgramId.eq(id))
            .count(&self.conn)
            .await
            .map_err(db_err)?;

        Ok((students > 0)
            .then_some(Dependents {
                relation: "students",
                count: students,
            })
            .into_iter()
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        program::Entity::find()
            .count(&self.conn)
            .await
            .map_err(db_err)
    }
}
