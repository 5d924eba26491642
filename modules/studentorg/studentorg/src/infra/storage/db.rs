//! Database error conversion helpers.

use std::fmt::Display;

use sea_orm::{DbErr, SqlErr};
use studentorg_sdk::EntityKind;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Convert any displayable error into a `DomainError::Database`.
pub fn db_err(e: impl Display) -> DomainError {
    DomainError::database(e.to_string())
}

pub fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub fn is_foreign_key_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Insert/update failure. A foreign key violation means the parent vanished
/// between validation and write, reported against `fk_field`.
pub fn write_err(e: DbErr, fk_field: &str) -> DomainError {
    if is_foreign_key_violation(&e) {
        DomainError::validation(fk_field, "referenced record does not exist")
    } else {
        db_err(e)
    }
}

/// Update failure; a vanished row is `NotFound`.
pub fn update_err(e: DbErr, entity: EntityKind, id: Uuid, fk_field: &str) -> DomainError {
    match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => DomainError::not_found(entity, id),
        other => write_err(other, fk_field),
    }
}

/// Delete failure. The `ON DELETE RESTRICT` backstop surfaces as a conflict.
pub fn delete_err(e: DbErr, entity: EntityKind, id: Uuid) -> DomainError {
    if is_foreign_key_violation(&e) {
        DomainError::conflict(entity, id, Vec::new())
    } else {
        db_err(e)
    }
}
