//! REST error mapping for the records API.

use http::StatusCode;
use studentorg_sdk::Dependents;

use super::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;

/// An empty list comes from the storage-level restrict backstop, which does
/// not know what is referencing the row.
fn describe_blocking(blocking: &[Dependents]) -> String {
    if blocking.is_empty() {
        return "dependent records".to_owned();
    }
    blocking
        .iter()
        .map(|d| format!("{} {}", d.count, d.relation))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert `DomainError` to Problem for REST responses.
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let trace_id = tracing::Span::current()
            .id()
            .map(|id| id.into_u64().to_string());

        let problem = match e {
            DomainError::Validation { violations } => Problem::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed",
                format!("{} field(s) rejected", violations.len()),
            )
            .with_code("STUDENTORG_VALIDATION")
            .with_errors(
                violations
                    .into_iter()
                    .map(|v| ValidationViolation {
                        field: v.field,
                        message: v.message,
                    })
                    .collect(),
            ),
            DomainError::NotFound { entity, id } => Problem::new(
                StatusCode::NOT_FOUND,
                "Not found",
                format!("No {entity} with id {id}"),
            )
            .with_code("STUDENTORG_NOT_FOUND"),
            DomainError::Conflict {
                entity,
                id,
                blocking,
            } => Problem::new(
                StatusCode::CONFLICT,
                "Delete blocked",
                format!(
                    "{entity} {id} is still referenced by {}",
                    describe_blocking(&blocking)
                ),
            )
            .with_code("STUDENTORG_CONFLICT"),
            DomainError::Unauthorized => {
                Problem::new(StatusCode::FORBIDDEN, "Forbidden", "Unauthorized")
                    .with_code("STUDENTORG_UNAUTHORIZED")
            }
            DomainError::ExternalOperation(msg) => {
                tracing::error!(error = %msg, "External operation failed");
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "External operation failed",
                    msg,
                )
                .with_code("STUDENTORG_EXTERNAL")
            }
            DomainError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "An internal database error occurred",
                )
                .with_code("STUDENTORG_INTERNAL")
            }
        };

        match trace_id {
            Some(id) => problem.with_trace_id(id),
            None => problem,
        }
    }
}

#[cfg(test)]
mod tests {
    use studentorg_sdk::EntityKind;
    use uuid::Uuid;

    use super::*;
    use crate::domain::error::Violation;

    #[test]
    fn validation_lists_every_field() {
        let p: Problem = DomainError::Validation {
            violations: vec![
                Violation::new("lastname", "is required"),
                Violation::new("program_id", "program does not exist"),
            ],
        }
        .into();

        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<_> = p
            .errors
            .unwrap()
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, ["lastname", "program_id"]);
    }

    #[test]
    fn conflict_names_relation_and_count() {
        let id = Uuid::nil();
        let p: Problem = DomainError::conflict(
            EntityKind::College,
            id,
            vec![
                Dependents {
                    relation: "programs",
                    count: 2,
                },
                Dependents {
                    relation: "organizations",
                    count: 1,
                },
            ],
        )
        .into();

        assert_eq!(p.status, StatusCode::CONFLICT);
        assert_eq!(
            p.detail,
            format!("college {id} is still referenced by 2 programs, 1 organizations")
        );
    }

    #[test]
    fn conflict_without_counts_still_reads() {
        let id = Uuid::nil();
        let p: Problem = DomainError::conflict(EntityKind::Student, id, Vec::new()).into();

        assert_eq!(p.status, StatusCode::CONFLICT);
        assert_eq!(
            p.detail,
            format!("student {id} is still referenced by dependent records")
        );
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let p: Problem = DomainError::database("UNIQUE constraint failed: students.x").into();

        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("students"));
    }

    #[test]
    fn not_found_is_404() {
        let p: Problem = DomainError::not_found(EntityKind::OrgMember, Uuid::nil()).into();
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.code, "STUDENTORG_NOT_FOUND");
    }
}
