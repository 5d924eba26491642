//! Domain errors for the student organization module.

use studentorg_sdk::{Dependents, EntityKind};
use thiserror::Error;
use uuid::Uuid;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain-level errors for records operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// One or more input fields were rejected. Nothing was written.
    #[error("validation failed on {} field(s)", .violations.len())]
    Validation { violations: Vec<Violation> },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },

    /// Delete blocked by dependent rows.
    #[error("{entity} {id} is still referenced by dependent records")]
    Conflict {
        entity: EntityKind,
        id: Uuid,
        blocking: Vec<Dependents>,
    },

    /// Deploy token missing or wrong.
    #[error("unauthorized")]
    Unauthorized,

    /// The external deployment pipeline failed.
    #[error("external operation failed: {0}")]
    ExternalOperation(String),

    #[error("database error: {0}")]
    Database(String),
}

impl DomainError {
    /// Create a validation error for a single field.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![Violation::new(field, message)],
        }
    }

    #[must_use]
    pub fn not_found(entity: EntityKind, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub fn conflict(entity: EntityKind, id: Uuid, blocking: Vec<Dependents>) -> Self {
        Self::Conflict {
            entity,
            id,
            blocking,
        }
    }

    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}
