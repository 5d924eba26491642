//! Field validation for create/update input.
//!
//! Violations are collected rather than returned on the first failure so a
//! rejected request reports every bad field at once.

use chrono::NaiveDate;

use super::error::{DomainError, Violation};

pub const COLLEGE_NAME_MAX: usize = 150;
pub const PROG_NAME_MAX: usize = 150;
pub const ORG_NAME_MAX: usize = 250;
pub const ORG_DESCRIPTION_MAX: usize = 250;
pub const STUDENT_ID_MAX: usize = 15;
pub const PERSON_NAME_MAX: usize = 25;

pub const REQUIRED: &str = "this field is required";

#[derive(Debug, Default)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(Violation::new(field, message));
    }

    /// Trim a required text field and check it against `max` characters.
    pub fn required_text(&mut self, field: &str, value: &str, max: usize) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, REQUIRED);
        } else {
            self.check_length(field, trimmed, max);
        }
        trimmed.to_owned()
    }

    /// Trim an optional text field. Blank values become `None`.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) -> Option<String> {
        let trimmed = value.map(str::trim).filter(|s| !s.is_empty())?;
        self.check_length(field, trimmed, max);
        Some(trimmed.to_owned())
    }

    /// Reject join dates after `today`.
    pub fn not_in_future(&mut self, field: &str, date: NaiveDate, today: NaiveDate) {
        if date > today {
            self.push(field, format!("must not be later than {today}"));
        }
    }

    fn check_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(field, format!("must be at most {max} characters"));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// # Errors
    /// Returns `DomainError::Validation` carrying every collected violation.
    pub fn finish(self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation { violations: self.0 })
        }
    }
}

/// Second step of the delete workflow: the caller must confirm.
///
/// # Errors
/// Returns `DomainError::Validation` on field `confirm` when not confirmed.
pub fn require_confirmation(confirm: bool) -> Result<(), DomainError> {
    if confirm {
        Ok(())
    } else {
        Err(DomainError::validation(
            "confirm",
            "deletion must be confirmed with \"confirm\": true",
        ))
    }
}
