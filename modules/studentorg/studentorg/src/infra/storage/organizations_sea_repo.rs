use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use studentorg_sdk::{Dependents, EntityKind, Organization, OrganizationRow, Page};
use uuid::Uuid;

use super::db::{db_err, delete_err, update_err, write_err};
use super::entity::{college, org_member, organization};
use super::mapper::{organization_insert, organization_update};
use super::pagination::fetch_page;
use super::search::{contains_pattern, folded_contains};
use crate::domain::error::DomainError;
use crate::domain::query::ListQuery;
use crate::domain::repos::OrganizationsRepository;

#[derive(Debug, FromQueryResult)]
struct OrganizationListing {
    id: Uuid,
    name: String,
    description: String,
    college_id: Uuid,
    college_name: String,
}

impl From<OrganizationListing> for OrganizationRow {
    fn from(r: OrganizationListing) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            college_id: r.college_id,
            college_name: r.college_name,
        }
    }
}

/// `SeaORM` implementation of `OrganizationsRepository`.
pub struct OrmOrganizationsRepository {
    conn: DatabaseConnection,
}

impl OrmOrganizationsRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrganizationsRepository for OrmOrganizationsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Organization>, DomainError> {
        let found = organization::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list_page(&self, query: &ListQuery) -> Result<Page<OrganizationRow>, DomainError> {
        let mut select = organization::Entity::find()
            .select_only()
            .column(organization::Column::Id)
            .column(organization::Column::Name)
            .column(organization::Column::Description)
            .column(organization::Column::CollegeId)
            .column_as(college::Column::CollegeName, "college_name")
            .join(JoinType::InnerJoin, organization::Relation::College.def());

        if let Some(term) = &query.search {
            let pattern = contains_pattern(term);
            select = select.filter(
                Condition::any()
                    .add(folded_contains(
                        (organization::Entity, organization::Column::NameFolded),
                        &pattern,
                    ))
                    .add(folded_contains(
                        (organization::Entity, organization::Column::DescriptionFolded),
                        &pattern,
                    ))
                    .add(folded_contains(
                        (college::Entity, college::Column::CollegeNameFolded),
                        &pattern,
                    )),
            );
        }

        let select = select
            .order_by_asc(college::Column::CollegeName)
            .order_by_asc(organization::Column::Name)
            .order_by_asc(organization::Column::Id)
            .into_model::<OrganizationListing>();

        let page = fetch_page(&self.conn, select, query.page)
            .await
            .map_err(db_err)?;
        Ok(page.map_items(Into::into))
    }

    async fn create(&self, organization: Organization) -> Result<Organization, DomainError> {
        let model = organization_insert(organization)
            .insert(&self.conn)
            .await
            .map_err(|e| write_err(e, "college_id"))?;
        Ok(model.into())
    }

    async fn update(&self, organization: Organization) -> Result<Organization, DomainError> {
        let id = organization.id;
        let model = organization_update(organization)
            .update(&self.conn)
            .await
            .map_err(|e| update_err(e, EntityKind::Organization, id, "college_id"))?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = organization::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(|e| delete_err(e, EntityKind::Organization, id))?;
        Ok(res.rows_affected > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count = organization::Entity::find_by_id(id)
            .count(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        let memberships = org_member::Entity::find()
            .filter(org_member::Column::OrganizationId.eq(id))
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
        organization::Entity::find()
            .count(&self.conn)
            .await
            .map_err(db_err)
    }
}
