//! StudentOrg SDK
//!
//! Transport-agnostic models for the student organization records module:
//! colleges, programs, students, organizations and organization memberships,
//! plus the listing rows, pagination envelope and dashboard summary the
//! module hands out.
//!
//! Wire representations (serde, `OpenAPI`) are owned by the REST layer of the
//! `studentorg` crate.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod models;
pub mod page;

pub use models::{
    College, Dashboard, DeleteSummary, Dependents, EntityKind, NewCollege, NewOrgMember,
    NewOrganization, NewProgram, NewStudent, OrgMember, OrgMemberRow, Organization,
    OrganizationRow, Program, ProgramRow, Student, StudentRow,
};
pub use page::{PAGE_SIZE, Page, PageInfo};
