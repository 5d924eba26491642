use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::Order;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use studentorg_sdk::{EntityKind, OrgMember, OrgMemberRow, Page};
use uuid::Uuid;

use super::db::{db_err, delete_err, update_err, write_err};
use super::entity::{org_member, organization, student};
use super::mapper::{member_insert, member_update};
use super::pagination::fetch_page;
use super::search::{
    DatePart, contains_pattern, date_part_contains, folded_contains, is_numeric,
};
use crate::domain::error::DomainError;
use crate::domain::query::{ListQuery, MemberSort, MemberSortKey, SortOrder};
use crate::domain::repos::OrgMembersRepository;

#[derive(Debug, FromQueryResult)]
struct MemberListing {
    id: Uuid,
    student_id: Uuid,
    student_lastname: String,
    student_firstname: String,
    organization_id: Uuid,
    organization_name: String,
    date_joined: NaiveDate,
}

impl From<MemberListing> for OrgMemberRow {
    fn from(r: MemberListing) -> Self {
        Self {
            id: r.id,
            student_id: r.student_id,
            student_lastname: r.student_lastname,
            student_firstname: r.student_firstname,
            organization_id: r.organization_id,
            organization_name: r.organization_name,
            date_joined: r.date_joined,
        }
    }
}

/// `SeaORM` implementation of `OrgMembersRepository`.
pub struct OrmOrgMembersRepository {
    conn: DatabaseConnection,
}

impl OrmOrgMembersRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrgMembersRepository for OrmOrgMembersRepository {
    async fn get(&self, id: Uuid) -> Result<Option<OrgMember>, DomainError> {
        let found = org_member::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list_page(
        &self,
        query: &ListQuery,
        sort: MemberSort,
    ) -> Result<Page<OrgMemberRow>, DomainError> {
        let mut select = org_member::Entity::find()
            .select_only()
            .column(org_member::Column::Id)
            .column(org_member::Column::StudentId)
            .column_as(student::Column::Lastname, "student_lastname")
            .column_as(student::Column::Firstname, "student_firstname")
            .column(org_member::Column::OrganizationId)
            .column_as(organization::Column::Name, "organization_name")
            .column(org_member::Column::DateJoined)
            .join(JoinType::InnerJoin, org_member::Relation::Student.def())
            .join(JoinType::InnerJoin, org_member::Relation::Organization.def());

        if let Some(term) = &query.search {
            let pattern = contains_pattern(term);
            let mut any = Condition::any()
                .add(folded_contains((student::Entity, student::Column::LastnameFolded), &pattern))
                .add(folded_contains((student::Entity, student::Column::FirstnameFolded), &pattern))
                .add(folded_contains(
                    (organization::Entity, organization::Column::NameFolded),
                    &pattern,
                ));
            if is_numeric(term) {
                let backend = self.conn.get_database_backend();
                for part in [DatePart::Year, DatePart::Month, DatePart::Day] {
                    any = any.add(date_part_contains(
                        backend,
                        (org_member::Entity, org_member::Column::DateJoined),
                        part,
                        term,
                    ));
                }
            }
            select = select.filter(any);
        }

        let order = match sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        for key in sort.keys() {
            select = match key {
                MemberSortKey::StudentLastname => {
                    select.order_by(student::Column::Lastname, order.clone())
                }
                MemberSortKey::StudentFirstname => {
                    select.order_by(student::Column::Firstname, order.clone())
                }
                MemberSortKey::DateJoined => {
                    select.order_by(org_member::Column::DateJoined, order.clone())
                }
            };
        }
        let select = select
            .order_by_asc(org_member::Column::Id)
            .into_model::<MemberListing>();

        let page = fetch_page(&self.conn, select, query.page)
            .await
            .map_err(db_err)?;
        Ok(page.map_items(Into::into))
    }

    async fn create(&self, member: OrgMember) -> Result<OrgMember, DomainError> {
        let model = member_insert(member)
            .insert(&self.conn)
            .await
            .map_err(|e| write_err(e, "references"))?;
        Ok(model.into())
    }

    async fn update(&self, member: OrgMember) -> Result<OrgMember, DomainError> {
        let id = member.id;
        let model = member_update(member)
            .update(&self.conn)
            .await
            .map_err(|e| update_err(e, EntityKind::OrgMember, id, "references"))?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = org_member::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(|e| delete_err(e, EntityKind::OrgMember, id))?;
        Ok(res.rows_affected > 0)
    }

    async fn count_distinct_students_joined(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<u64, DomainError> {
        org_member::Entity::find()
            .select_only()
            .column(org_member::Column::StudentId)
            .filter(org_member::Column::DateJoined.gte(from))
            .filter(org_member::Column::DateJoined.lt(until))
            .distinct()
            .count(&self.conn)
            .await
            .map_err(db_err)
    }
}
