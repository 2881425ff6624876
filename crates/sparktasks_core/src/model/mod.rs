//! Domain records for tasks, notes, quotes and the activity feed.
//!
//! # Responsibility
//! - Define the four record types persisted by the stores.
//! - Keep per-record validation next to the data it guards.
//!
//! # Invariants
//! - Every record has a stable `RecordId`.
//! - Records never reference one another.

pub mod activity;
pub mod note;
pub mod quote;
pub mod record;
pub mod task;
