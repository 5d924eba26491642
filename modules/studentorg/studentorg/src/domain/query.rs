//! Search, sort and page resolution for listings.
//!
//! Everything here is lenient: unknown sort keys, odd sort orders and
//! malformed page numbers degrade to the documented defaults instead of
//! failing the request.

use std::num::IntErrorKind;

/// Requested page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// 1-based page number; clamped to the last page by the store.
    Number(u64),
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl PageRequest {
    /// Parse the raw `page` parameter. Accepts a positive integer or `last`;
    /// a number too large for `u64` is past every page and means `last`.
    /// Anything else means page 1.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("last") => Self::Last,
            Some(s) => match s.parse::<u64>() {
                Ok(0) => Self::default(),
                Ok(n) => Self::Number(n),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => Self::Last,
                Err(_) => Self::default(),
            },
            None => Self::default(),
        }
    }

    /// Resolve against the number of pages available.
    #[must_use]
    pub fn resolve(self, num_pages: u64) -> u64 {
        match self {
            Self::Number(n) => n.clamp(1, num_pages.max(1)),
            Self::Last => num_pages.max(1),
        }
    }
}

/// Trimmed search term; blank or missing means no filter.
#[must_use]
pub fn normalize_search(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// Search term plus page for listings without a sort choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: PageRequest,
}

impl ListQuery {
    #[must_use]
    pub fn new(q: Option<&str>, page: Option<&str>) -> Self {
        Self {
            search: normalize_search(q),
            page: PageRequest::parse(page),
        }
    }
}

/// Program listing sort; always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgramSort {
    #[default]
    ProgName,
    CollegeName,
}

impl ProgramSort {
    /// Resolve `sort_by`. Values outside the allow-list fall back to `prog_name`.
    #[must_use]
    pub fn resolve(sort_by: Option<&str>) -> Self {
        match sort_by.map(str::trim) {
            Some("college__college_name") => Self::CollegeName,
            _ => Self::ProgName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortKey {
    StudentLastname,
    StudentFirstname,
    DateJoined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only the literal `desc` reverses the order.
    #[must_use]
    pub fn resolve(sort_order: Option<&str>) -> Self {
        match sort_order.map(str::trim) {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Membership listing sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberSort {
    pub key: MemberSortKey,
    pub order: SortOrder,
}

impl Default for MemberSort {
    fn default() -> Self {
        Self {
            key: MemberSortKey::StudentLastname,
            order: SortOrder::Asc,
        }
    }
}

impl MemberSort {
    /// Resolve `sort_by`/`sort_order`. Unknown keys fall back to the
    /// student's last name.
    #[must_use]
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let key = match sort_by.map(str::trim) {
            Some("student__firstname") => MemberSortKey::StudentFirstname,
            Some("date_joined") => MemberSortKey::DateJoined,
            _ => MemberSortKey::StudentLastname,
        };
        Self {
            key,
            order: SortOrder::resolve(sort_order),
        }
    }

    /// Active sort keys in priority order. Sorting by last name always adds
    /// first name as the secondary key.
    #[must_use]
    pub fn keys(&self) -> Vec<MemberSortKey> {
        match self.key {
            MemberSortKey::StudentLastname => {
                vec![MemberSortKey::StudentLastname, MemberSortKey::StudentFirstname]
            }
            other => vec![other],
        }
    }
}
