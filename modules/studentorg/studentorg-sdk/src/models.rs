//! Student organization domain models.
//!
//! These are transport-agnostic models used across the SDK.
//! Note: NO serde derives here - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Top-level academic unit owning programs and organizations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct College {
    pub id: Uuid,
    pub college_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or fully replacing a college.
#[derive(Debug, Clone, Default)]
pub struct NewCollege {
    pub college_name: String,
}

/// Academic program; belongs to exactly one college.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub id: Uuid,
    pub prog_name: String,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProgram {
    pub prog_name: String,
    pub college_id: Uuid,
}

/// Program listing row carrying the parent college's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRow {
    pub id: Uuid,
    pub prog_name: String,
    pub college_id: Uuid,
    pub college_name: String,
}

/// Student record. `student_id` is the school-issued business key, unique
/// across all students; `id` is the surrogate primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub program_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub program_id: Uuid,
}

/// Student listing row carrying the program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub id: Uuid,
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub program_id: Uuid,
    pub prog_name: String,
}

/// Student club or group; belongs to exactly one college.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub college_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewOrganization {
    pub name: String,
    pub description: String,
    pub college_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub college_id: Uuid,
    pub college_name: String,
}

/// Membership of a student in an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgMember {
    pub id: Uuid,
    /// Surrogate key of the student row (not the business `student_id`).
    pub student_id: Uuid,
    pub organization_id: Uuid,
    pub date_joined: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrgMember {
    pub student_id: Uuid,
    pub organization_id: Uuid,
    /// `None` is rejected as a missing field.
    pub date_joined: Option<NaiveDate>,
}

/// Membership listing row with the student's names and the organization name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgMemberRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_lastname: String,
    pub student_firstname: String,
    pub organization_id: Uuid,
    pub organization_name: String,
    pub date_joined: NaiveDate,
}

/// The five record kinds managed by the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    College,
    Program,
    Student,
    Organization,
    OrgMember,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::College => "college",
            Self::Program => "program",
            Self::Student => "student",
            Self::Organization => "organization",
            Self::OrgMember => "orgmember",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dependent rows that block deleting a parent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependents {
    /// Relationship name, e.g. `programs` or `memberships`.
    pub relation: &'static str,
    pub count: u64,
}

/// What a delete would do, shown before the caller confirms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSummary {
    pub entity: EntityKind,
    pub id: Uuid,
    pub label: String,
    pub blocking: Vec<Dependents>,
}

impl DeleteSummary {
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.blocking.is_empty()
    }
}

/// Summary counts for the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    pub total_students: u64,
    pub total_programs: u64,
    pub total_organizations: u64,
    /// Distinct students with at least one membership dated in `year`.
    pub students_joined_this_year: u64,
    pub year: i32,
}
