#![allow(clippy::doc_markdown)] // Domain terms without backticks
#![allow(clippy::missing_errors_doc)] // Every service operation returns DomainError
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

//! Student organization records module.
//!
//! Keeps a school's colleges, programs, students, organizations and
//! organization memberships, and serves them over a JSON API:
//!
//! - Searchable, sortable listings paged by five records
//! - Validated create and full update
//! - Two-step delete that refuses while dependent records exist
//! - Dashboard counts
//! - A token-guarded trigger for an external deployment pipeline
//!
//! ## Architecture
//!
//! ```text
//!   REST API (api::rest)
//!          │
//!          ▼
//!   Domain services (domain::service) ──► DeployPipeline port
//!          │                                     │
//!          ▼ repository traits                   ▼
//!   SeaORM repositories (infra::storage)   HTTP client (infra::deploy)
//! ```

// === PUBLIC API (from SDK) ===
pub use studentorg_sdk::{
    College, Dashboard, DeleteSummary, Dependents, EntityKind, NewCollege, NewOrgMember,
    NewOrganization, NewProgram, NewStudent, OrgMember, OrgMemberRow, Organization,
    OrganizationRow, PAGE_SIZE, Page, PageInfo, Program, ProgramRow, Student, StudentRow,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::StudentOrgModule;

pub mod config;
pub mod secret;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
