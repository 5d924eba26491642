use chrono::{Datelike, NaiveDate, Utc};
use studentorg_sdk::Dashboard;
use tracing::{debug, instrument};

use super::Service;
use crate::domain::error::DomainError;

/// `[Jan 1 of year, Jan 1 of year + 1)`.
fn year_window(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?,
    ))
}

impl Service {
    /// Summary counts, recomputed on every call. "This year" follows the
    /// server's UTC clock at request time.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<Dashboard, DomainError> {
        let year = Utc::now().year();
        let (from, until) = year_window(year)
            .ok_or_else(|| DomainError::database(format!("year {year} is out of range")))?;

        let (total_students, total_programs, total_organizations, students_joined_this_year) = tokio::try_join!(
            self.students.count(),
            self.programs.count(),
            self.organizations.count(),
            self.members.count_distinct_students_joined(from, until),
        )?;

        debug!(year, students_joined_this_year, "Dashboard computed");
        Ok(Dashboard {
            total_students,
            total_programs,
            total_organizations,
            students_joined_this_year,
            year,
        })
    }
}
