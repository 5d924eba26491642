//! REST DTOs for the records API.
//!
//! These DTOs have serde and utoipa derives for REST serialization. Text
//! and foreign-key fields default when absent so a partial form reaches the
//! domain validator and comes back as a list of field violations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use studentorg_sdk::{
    College, Dashboard, DeleteSummary, NewCollege, NewOrgMember, NewOrganization, NewProgram,
    NewStudent, OrgMember, OrgMemberRow, Organization, OrganizationRow, Page, PageInfo, Program,
    ProgramRow, Student, StudentRow,
};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::query::ListQuery;

// === Listing ===

/// Query string accepted by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive search term. Blank means no filter.
    pub q: Option<String>,
    /// Positive page number or `last`.
    pub page: Option<String>,
    /// Sort key (programs and organization members only).
    pub sort_by: Option<String>,
    /// `asc` or `desc` (organization members only).
    pub sort_order: Option<String>,
}

impl ListParams {
    pub fn list_query(&self) -> ListQuery {
        ListQuery::new(self.q.as_deref(), self.page.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageInfoDto {
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<PageInfo> for PageInfoDto {
    fn from(p: PageInfo) -> Self {
        Self {
            number: p.number,
            num_pages: p.num_pages,
            total_items: p.total_items,
            page_size: p.page_size,
            has_next: p.has_next(),
            has_previous: p.has_previous(),
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub page_info: PageInfoDto,
}

impl<T> PageDto<T> {
    pub fn from_page<S>(page: Page<S>) -> Self
    where
        T: From<S>,
    {
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            page_info: page.page_info.into(),
        }
    }
}

// === College ===

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollegeDto {
    pub id: Uuid,
    pub college_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<College> for CollegeDto {
    fn from(c: College) -> Self {
        Self {
            id: c.id,
            college_name: c.college_name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CollegeRequest {
    pub college_name: String,
}

impl From<CollegeRequest> for NewCollege {
    fn from(r: CollegeRequest) -> Self {
        Self {
            college_name: r.college_name,
        }
    }
}

// === Program ===

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProgramDto {
    pub id: Uuid,
    pub prog_name: String,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Program> for ProgramDto {
    fn from(p: Program) -> Self {
        Self {
            id: p.id,
            prog_name: p.prog_name,
            college_id: p.college_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProgramRowDto {
    pub id: Uuid,
    pub prog_name: String,
    pub college_id: Uuid,
    pub college_name: String,
}

impl From<ProgramRow> for ProgramRowDto {
    fn from(p: ProgramRow) -> Self {
        Self {
            id: p.id,
            prog_name: p.prog_name,
            college_id: p.college_id,
            college_name: p.college_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProgramRequest {
    pub prog_name: String,
    pub college_id: Uuid,
}

impl From<ProgramRequest> for NewProgram {
    fn from(r: ProgramRequest) -> Self {
        Self {
            prog_name: r.prog_name,
            college_id: r.college_id,
        }
    }
}

// === Student ===

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentDto {
    pub id: Uuid,
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middlename: Option<String>,
    pub program_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentDto {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            student_id: s.student_id,
            lastname: s.lastname,
            firstname: s.firstname,
            middlename: s.middlename,
            program_id: s.program_id,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentRowDto {
    pub id: Uuid,
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middlename: Option<String>,
    pub program_id: Uuid,
    pub prog_name: String,
}

impl From<StudentRow> for StudentRowDto {
    fn from(s: StudentRow) -> Self {
        Self {
            id: s.id,
            student_id: s.student_id,
            lastname: s.lastname,
            firstname: s.firstname,
            middlename: s.middlename,
            program_id: s.program_id,
            prog_name: s.prog_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct StudentRequest {
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub program_id: Uuid,
}

impl From<StudentRequest> for NewStudent {
    fn from(r: StudentRequest) -> Self {
        Self {
            student_id: r.student_id,
            lastname: r.lastname,
            firstname: r.firstname,
            middlename: r.middlename,
            program_id: r.program_id,
        }
    }
}

// === Organization ===

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrganizationDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationDto {
    fn from(o: Organization) -> Self {
        Self {
            id: o.id,
            name: o.name,
            description: o.description,
            college_id: o.college_id,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrganizationRowDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub college_id: Uuid,
    pub college_name: String,
}

impl From<OrganizationRow> for OrganizationRowDto {
    fn from(o: OrganizationRow) -> Self {
        Self {
            id: o.id,
            name: o.name,
            description: o.description,
            college_id: o.college_id,
            college_name: o.college_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct OrganizationRequest {
    pub name: String,
    pub description: String,
    pub college_id: Uuid,
}

impl From<OrganizationRequest> for NewOrganization {
    fn from(r: OrganizationRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            college_id: r.college_id,
        }
    }
}

// === Organization member ===

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrgMemberDto {
    pub id: Uuid,
    /// Surrogate id of the student row.
    pub student_id: Uuid,
    pub organization_id: Uuid,
    pub date_joined: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrgMember> for OrgMemberDto {
    fn from(m: OrgMember) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            organization_id: m.organization_id,
            date_joined: m.date_joined,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrgMemberRowDto {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_lastname: String,
    pub student_firstname: String,
    pub organization_id: Uuid,
    pub organization_name: String,
    pub date_joined: NaiveDate,
}

impl From<OrgMemberRow> for OrgMemberRowDto {
    fn from(m: OrgMemberRow) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            student_lastname: m.student_lastname,
            student_firstname: m.student_firstname,
            organization_id: m.organization_id,
            organization_name: m.organization_name,
            date_joined: m.date_joined,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct OrgMemberRequest {
    pub student_id: Uuid,
    pub organization_id: Uuid,
    pub date_joined: Option<NaiveDate>,
}

impl From<OrgMemberRequest> for NewOrgMember {
    fn from(r: OrgMemberRequest) -> Self {
        Self {
            student_id: r.student_id,
            organization_id: r.organization_id,
            date_joined: r.date_joined,
        }
    }
}

// === Delete workflow ===

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DependentsDto {
    pub relation: String,
    pub count: u64,
}

/// Shown before a delete is confirmed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteSummaryDto {
    pub entity: String,
    pub id: Uuid,
    pub label: String,
    pub blocking: Vec<DependentsDto>,
    pub can_delete: bool,
}

impl From<DeleteSummary> for DeleteSummaryDto {
    fn from(s: DeleteSummary) -> Self {
        let can_delete = s.can_delete();
        Self {
            entity: s.entity.to_string(),
            id: s.id,
            label: s.label,
            blocking: s
                .blocking
                .into_iter()
                .map(|d| DependentsDto {
                    relation: d.relation.to_owned(),
                    count: d.count,
                })
                .collect(),
            can_delete,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct DeleteConfirmRequest {
    pub confirm: bool,
}

// === Dashboard, health, deploy ===

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardDto {
    pub total_students: u64,
    pub total_programs: u64,
    pub total_organizations: u64,
    pub students_joined_this_year: u64,
    pub year: i32,
}

impl From<Dashboard> for DashboardDto {
    fn from(d: Dashboard) -> Self {
        Self {
            total_students: d.total_students,
            total_programs: d.total_programs,
            total_organizations: d.total_organizations,
            students_joined_this_year: d.students_joined_this_year,
            year: d.year,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeployStatus {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeployError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use studentorg_sdk::{Dependents, EntityKind, PAGE_SIZE};

    use super::*;

    #[test]
    fn page_info_reports_neighbours() {
        let dto = PageInfoDto::from(PageInfo::new(2, 12));
        assert_eq!(dto.num_pages, 3);
        assert_eq!(dto.page_size, PAGE_SIZE);
        assert!(dto.has_next);
        assert!(dto.has_previous);
    }

    #[test]
    fn missing_text_fields_reach_the_validator() {
        let req: StudentRequest = serde_json::from_str(r#"{"lastname":"Cruz"}"#).unwrap();
        assert_eq!(req.lastname, "Cruz");
        assert!(req.student_id.is_empty());
        assert!(req.program_id.is_nil());
    }

    #[test]
    fn delete_summary_exposes_can_delete() {
        let dto = DeleteSummaryDto::from(DeleteSummary {
            entity: EntityKind::Program,
            id: Uuid::nil(),
            label: "BS Computer Science".to_owned(),
            blocking: vec![Dependents {
                relation: "students",
                count: 4,
            }],
        });
        let json = serde_json::to_value(dto).unwrap();

        assert_eq!(json["entity"], "program");
        assert_eq!(json["can_delete"], false);
        assert_eq!(json["blocking"][0]["relation"], "students");
        assert_eq!(json["blocking"][0]["count"], 4);
    }

    #[test]
    fn confirm_defaults_to_false() {
        let req: DeleteConfirmRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.confirm);
    }
}
