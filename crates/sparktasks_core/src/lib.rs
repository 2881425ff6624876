//! Core state and persistence for SparkTasks.
//! Tasks, notes, favorite quotes and the activity feed live here; UI layers
//! call in through `AppService` or the individual stores.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{Activity, ActivityType};
pub use model::note::{Note, NoteCategory, NotePatch};
pub use model::quote::{find_quote, quote_catalog, MotivationalQuote, QuoteCategory};
pub use model::record::{now_epoch_ms, Record, RecordId, ValidationError};
pub use model::task::{Task, TaskFilter, TaskPatch, TaskPriority};
pub use service::app_service::AppService;
pub use service::dashboard::{greeting, progress, progress_percent, time_ago, DashboardSnapshot};
pub use store::activity_store::{ActivityStore, ACTIVITY_LOG_CAPACITY, HOME_FEED_LIMIT};
pub use store::note_store::NoteStore;
pub use store::preferences::{Preferences, DEFAULT_USER_NAME};
pub use store::quote_store::QuoteStore;
pub use store::record_store::{Eviction, InsertPosition, LoadStatus, RecordStore, StorePolicy};
pub use store::task_store::TaskStore;
pub use store::{keys, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
