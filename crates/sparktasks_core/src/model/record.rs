//! Shared contract for records kept in persisted sequences.
//!
//! # Responsibility
//! - Give every record type a stable identity accessor.
//! - Define the validation hook run before any write.
//!
//! # Invariants
//! - `Record::id()` never changes for the lifetime of a record.
//! - Records must round-trip through `serde_json` without loss.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier shared by all record types.
pub type RecordId = Uuid;

/// Validation failures detected before a record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    Blank(&'static str),
    /// `NoteCategory::All` only exists for filtering.
    FilterOnlyCategory,
    /// `updated_at` precedes `created_at`.
    TimestampOrder { created_at: i64, updated_at: i64 },
    /// An update tried to rewrite the record identity.
    IdChanged { expected: RecordId, found: RecordId },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank(field) => write!(f, "{field} cannot be blank"),
            Self::FilterOnlyCategory => {
                write!(f, "category `all` is a filter and cannot be stored")
            }
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must not be earlier than created_at ({created_at})"
            ),
            Self::IdChanged { expected, found } => {
                write!(f, "record id is immutable: expected {expected}, found {found}")
            }
        }
    }
}

impl Error for ValidationError {}

/// A value that can live inside a `RecordStore`.
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> RecordId;

    /// Checks field-level invariants. Records without rules accept everything.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Current wall clock as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

/// Case-insensitive substring match used by list filters.
///
/// An empty (or whitespace-only) query matches everything.
pub fn matches_search(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::{matches_search, now_epoch_ms, require_text, ValidationError};

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            require_text("title", "   "),
            Err(ValidationError::Blank("title"))
        );
        assert!(require_text("title", "x").is_ok());
    }

    #[test]
    fn search_ignores_case_and_empty_query() {
        assert!(matches_search("", &["anything"]));
        assert!(matches_search("MILK", &["buy milk", ""]));
        assert!(!matches_search("bread", &["buy milk", "today"]));
    }

    #[test]
    fn clock_is_after_epoch() {
        assert!(now_epoch_ms() > 0);
    }
}
