//! Persisted record stores.
//!
//! # Responsibility
//! - Keep each record sequence in memory and mirror it to one key.
//! - Report not-found, validation and write failures as explicit errors.
//!
//! # Invariants
//! - Every successful mutation writes the full sequence before returning.
//! - A failed lookup or validation never writes.
//! - Stores are independent; nothing is transactional across keys.

use crate::kv::KvError;
use crate::model::record::{RecordId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity_store;
pub mod note_store;
pub mod preferences;
pub mod quote_store;
pub mod record_store;
pub mod task_store;

/// Storage keys, one per store plus the scalar preference mirrors.
pub mod keys {
    pub const TASKS: &str = "savedTasks";
    pub const NOTES: &str = "savedNotes";
    pub const FAVORITE_QUOTES: &str = "favoriteQuotes";
    pub const ACTIVITIES: &str = "recent_activities";
    pub const COMPLETED_TASKS_COUNT: &str = "completedTasksCount";
    pub const TOTAL_TASKS_COUNT: &str = "totalTasksCount";
    pub const HAS_COMPLETED_ONBOARDING: &str = "hasCompletedOnboarding";
    pub const USER_NAME: &str = "userName";
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// No record with this id exists in the store.
    NotFound(RecordId),
    Validation(ValidationError),
    /// Sequence could not be serialized.
    Encode(serde_json::Error),
    /// Backend read or write failed.
    Storage(KvError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode records: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}
