//! Search predicates shared by the listing queries.
//!
//! Searchable text is stored twice: as entered, and folded to lowercase by
//! [`fold`] in a `*_folded` column when the row is written. Substring matches
//! are `folded_col LIKE '%term%' ESCAPE '\'` with the term folded the same
//! way. SQLite's `LOWER()` only knows ASCII, so folding happens here rather
//! than in SQL.

use sea_orm::DbBackend;
use sea_orm::sea_query::{Alias, Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

/// Unicode lowercase form stored in the `*_folded` columns.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// `%term%` with `\`, `%` and `_` escaped, folded.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in fold(term).chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Substring match of `pattern` (see [`contains_pattern`]) against a
/// `*_folded` column.
pub fn folded_contains(col: impl IntoColumnRef, pattern: &str) -> SimpleExpr {
    Expr::col(col).like(LikeExpr::new(pattern).escape('\\'))
}

#[derive(Debug, Clone, Copy)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    fn sqlite_format(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%m",
            Self::Day => "%d",
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }
}

/// Match `digits` as a substring of one date component written as an
/// unpadded decimal (March is `3`, not `03`).
pub fn date_part_contains(
    backend: DbBackend,
    col: impl IntoColumnRef,
    part: DatePart,
    digits: &str,
) -> SimpleExpr {
    let extracted = match backend {
        DbBackend::Sqlite => Func::cust(Alias::new("strftime"))
            .arg(part.sqlite_format())
            .arg(Expr::col(col)),
        _ => Func::cust(Alias::new("date_part"))
            .arg(part.field_name())
            .arg(Expr::col(col)),
    };
    let as_text = Func::cast_as(
        Func::cast_as(extracted, Alias::new("INTEGER")),
        Alias::new("TEXT"),
    );
    Expr::expr(as_text).like(format!("%{digits}%"))
}

/// Date components are only worth matching for purely numeric terms.
pub fn is_numeric(term: &str) -> bool {
    !term.is_empty() && term.chars().all(|c| c.is_ascii_digit())
}
