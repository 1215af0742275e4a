//! Statement classification by leading keyword.
//!
//! Chooses an execution path per statement. This is deliberately a prefix
//! match rather than a parse: a statement with no recognizable keyword is
//! attempted as a row-returning query and the store's own validation
//! produces the eventual error.

use std::fmt;

/// Execution path for a single statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementClass {
    /// Schema changes (CREATE, ALTER, DROP): executed, reported as a status
    /// message since affected-row counts are not meaningful.
    SchemaMutating,
    /// Row changes (DELETE, UPDATE, INSERT): executed, reported with the
    /// affected-row count.
    RowMutating,
    /// Everything else: run as a query and streamed into a result set.
    RowReturning,
}

impl fmt::Display for StatementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaMutating => write!(f, "schema-mutating"),
            Self::RowMutating => write!(f, "row-mutating"),
            Self::RowReturning => write!(f, "row-returning"),
        }
    }
}

const SCHEMA_KEYWORDS: &[&str] = &["CREATE", "ALTER", "DROP"];
const ROW_KEYWORDS: &[&str] = &["DELETE", "UPDATE", "INSERT"];

/// Classifies one statement by its leading keyword, case-insensitively.
///
/// Leading whitespace is ignored. Pure and stateless.
pub fn classify(statement: &str) -> StatementClass {
    let trimmed = statement.trim_start();

    if has_any_prefix(trimmed, SCHEMA_KEYWORDS) {
        StatementClass::SchemaMutating
    } else if has_any_prefix(trimmed, ROW_KEYWORDS) {
        StatementClass::RowMutating
    } else {
        StatementClass::RowReturning
    }
}

fn has_any_prefix(s: &str, prefixes: &[&str]) -> bool {
    // Slicing the &str could land inside a multibyte character; compare bytes.
    let bytes = s.as_bytes();
    prefixes.iter().any(|prefix| {
        bytes.len() >= prefix.len()
            && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    })
}
