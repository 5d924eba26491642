use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use studentorg_sdk::{College, Dependents, EntityKind, Page};
use uuid::Uuid;

use super::db::{db_err, delete_err, update_err};
use super::entity::{college, organization, program};
use super::mapper::{college_insert, college_update};
use super::pagination::fetch_page;
use super::search::{contains_pattern, folded_contains};
use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;
use crate::domain::repos::CollegesRepository;

/// `SeaORM` implementation of `CollegesRepository`.
pub struct OrmCollegesRepository {
    conn: DatabaseConnection,
}

impl OrmCollegesRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CollegesRepository for OrmCollegesRepository {
    async fn get(&self, id: Uuid) -> Result<Option<College>, DomainError> {
        let found = college::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list_page(&self, query: &ListQuery) -> Result<Page<College>, DomainError> {
        let mut select = college::Entity::find();
        if let Some(term) = &query.search {
            let pattern = contains_pattern(term);
            select = select.filter(
                Condition::any().add(folded_contains(
                    (college::Entity, college::Column::CollegeNameFolded),
                    &pattern,
                )),
            );
        }
        let select = select
            .order_by_asc(college::Column::CollegeName)
            .order_by_asc(college::Column::Id);

        let page = fetch_page(&self.conn, select, query.page)
            .await
            .map_err(db_err)?;
        Ok(page.map_items(Into::into))
    }

    async fn create(&self, college: College) -> Result<College, DomainError> {
        let model = college_insert(college)
            .insert(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(model.into())
    }

    async fn update(&self, college: College) -> Result<College, DomainError> {
        let id = college.id;
        let model = college_update(college)
            .update(&self.conn)
            .await
            .map_err(|e| update_err(e, EntityKind::College, id, "college_name"))?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = college::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(|e| delete_err(e, EntityKind::College, id))?;
        Ok(res.rows_affected > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count = college::Entity::find_by_id(id)
            .count(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        let programs = program::Entity::find()
            .filter(program::Column::CollegeId.eq(id))
            .count(&self.conn)
            .await
            .map_err(db_err)?;
        let organizations = organization::Entity::find()
            .filter(organization::Column::CollegeId.eq(id))
            .count(&self.conn)
            .await
            .map_err(db_err)?;

        Ok([("programs", programs), ("organizations", organizations)]
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(relation, count)| Dependents { relation, count })
            .collect())
    }
}
