//! Domain services for the student organization records.
//!
//! [`Service`] owns every records operation: listing, lookup, validated
//! create/update, and the two-step delete. Each entity's operations live in
//! their own file as a separate `impl Service` block. [`DeployService`] is
//! kept apart because it touches no records.

use std::sync::Arc;

use studentorg_sdk::DeleteSummary;

use super::error::DomainError;
use super::repos::{
    CollegesRepository, OrgMembersRepository, OrganizationsRepository, ProgramsRepository,
    StudentsRepository,
};

mod colleges;
mod dashboard;
mod deploy;
mod members;
mod organizations;
mod programs;
mod students;

pub use deploy::DeployService;

/// Domain service for records operations.
pub struct Service {
    colleges: Arc<dyn CollegesRepository>,
    programs: Arc<dyn ProgramsRepository>,
    students: Arc<dyn StudentsRepository>,
    organizations: Arc<dyn OrganizationsRepository>,
    members: Arc<dyn OrgMembersRepository>,
}

impl Service {
    pub fn new(
        colleges: Arc<dyn CollegesRepository>,
        programs: Arc<dyn ProgramsRepository>,
        students: Arc<dyn StudentsRepository>,
        organizations: Arc<dyn OrganizationsRepository>,
        members: Arc<dyn OrgMembersRepository>,
    ) -> Self {
        Self {
            colleges,
            programs,
            students,
            organizations,
            members,
        }
    }
}

/// Reject the delete when anything still references the record.
fn ensure_deletable(summary: DeleteSummary) -> Result<(), DomainError> {
    if summary.can_delete() {
        Ok(())
    } else {
        tracing::info!(
            entity = %summary.entity,
            id = %summary.id,
            blocking = summary.blocking.len(),
            "Delete rejected, dependent records exist"
        );
        Err(DomainError::conflict(
            summary.entity,
            summary.id,
            summary.blocking,
        ))
    }
}

#[cfg(test)]
mod service_test;
