//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose screen-level task, note, quote and feed operations to Dart via FRB.
//! - Flatten core records into plain string/number items for the UI.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every DB-backed call holds `APP_LOCK` for its whole load-mutate-persist
//!   cycle, so whole-sequence writes from two calls never interleave.
//! - `quote_random` never returns the quote its previous call returned.
//! - Record IDs cross the boundary as hyphenated UUID strings.

use log::error;
use rand::thread_rng;
use sparktasks_core::db::open_db;
use sparktasks_core::{
    core_version as core_version_inner, greeting, init_logging as init_logging_inner,
    now_epoch_ms, ping as ping_inner, progress_percent, time_ago, Activity, AppService,
    MotivationalQuote, Note, NoteCategory, NotePatch, RecordId, SqliteKvStore, Task, TaskFilter,
    TaskPatch, TaskPriority, HOME_FEED_LIMIT,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;

const DB_FILE_NAME: &str = "sparktasks.sqlite3";
const FEED_LIMIT_MAX: u32 = 20;
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static APP_LOCK: Mutex<()> = Mutex::new(());
/// Quote shown by the last `quote_random`; only touched while `APP_LOCK` is held.
static LAST_QUOTE: Mutex<Option<RecordId>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    /// `low|medium|high`.
    pub priority: String,
    pub due_date: i64,
    pub created_at: i64,
}

/// Note row for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Display label (`Personal`, `Work`, ...).
    pub category: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteItem {
    pub id: String,
    pub text: String,
    pub author: String,
    pub category: String,
    pub is_favorite: bool,
}

/// Feed row with its relative time label already computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub id: String,
    /// `taskCompleted|noteCreated|taskCreated`.
    pub kind: String,
    pub headline: String,
    pub title: String,
    pub subtitle: String,
    pub date: i64,
    pub time_ago: String,
}

/// Home screen projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub greeting: String,
    pub user_name: String,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub notes: u32,
    pub progress_percent: u32,
    pub recent_activities: Vec<ActivityItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub items: Vec<TaskItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub items: Vec<NoteItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteListResponse {
    pub items: Vec<QuoteItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityListResponse {
    pub items: Vec<ActivityItem>,
    pub message: String,
    /// Effective applied feed limit.
    pub applied_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResponse {
    pub quote: Option<QuoteItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub summary: Option<DashboardSummary>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub user_name: String,
    pub has_completed_onboarding: bool,
    pub message: String,
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected record ID, when the action targets one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<RecordId>) -> Self {
        Self {
            ok: true,
            id: id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Lists tasks passing `filter` (`all|pending|completed|high_priority`) and
/// matching `search` in title or description.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list(filter: String, search: String) -> TaskListResponse {
    let result = parse_task_filter(&filter).and_then(|filter| {
        with_app(|app| {
            Ok(app
                .tasks()
                .filtered(filter, search.trim())
                .into_iter()
                .map(to_task_item)
                .collect::<Vec<_>>())
        })
    });
    match result {
        Ok(items) => TaskListResponse {
            message: count_message(items.len()),
            items,
        },
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("tasks_list failed: {err}"),
        },
    }
}

/// Creates a task and logs it to the activity feed.
///
/// Empty `priority` means `medium`. `due_date` is epoch milliseconds; `None`
/// means due now.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(
    title: String,
    description: String,
    priority: String,
    due_date: Option<i64>,
) -> ActionResponse {
    let result = parse_priority(&priority).and_then(|priority| {
        let mut task = Task::new(title.trim())
            .with_description(description.trim())
            .with_priority(priority.unwrap_or_default());
        if let Some(due_date) = due_date {
            task = task.with_due_date(due_date);
        }
        with_app(|app| app.create_task(task).map_err(|err| err.to_string()))
    });
    match result {
        Ok(id) => ActionResponse::success("Task created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("task_create failed: {err}")),
    }
}

/// Edits a task; `None` fields keep their current value.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(
    task_id: String,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<i64>,
) -> ActionResponse {
    let result = parse_record_id(&task_id).and_then(|id| {
        let priority = match priority {
            Some(raw) => parse_priority(&raw)?,
            None => None,
        };
        let patch = TaskPatch {
            title: title.map(|value| value.trim().to_string()),
            description: description.map(|value| value.trim().to_string()),
            priority,
            due_date,
        };
        with_app(|app| {
            app.tasks_mut()
                .update(id, &patch)
                .map(|_| id)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(id) => ActionResponse::success("Task updated.", Some(id)),
        Err(err) => ActionResponse::failure(format!("task_update failed: {err}")),
    }
}

/// Flips completion. The message tells the UI which way it went.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> ActionResponse {
    let result = parse_record_id(&task_id).and_then(|id| {
        with_app(|app| {
            app.toggle_task(id)
                .map(|completed| (id, completed))
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok((id, true)) => ActionResponse::success("Task completed.", Some(id)),
        Ok((id, false)) => ActionResponse::success("Task reopened.", Some(id)),
        Err(err) => ActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> ActionResponse {
    let result = parse_record_id(&task_id).and_then(|id| {
        with_app(|app| {
            app.tasks_mut()
                .delete(id)
                .map(|()| id)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(id) => ActionResponse::success("Task deleted.", Some(id)),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Lists notes in `category` (empty or `all` for every category) matching
/// `search`, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(category: String, search: String) -> NoteListResponse {
    let result = parse_note_category(&category).and_then(|category| {
        with_app(|app| {
            Ok(app
                .notes()
                .filtered(category, search.trim())
                .into_iter()
                .map(to_note_item)
                .collect::<Vec<_>>())
        })
    });
    match result {
        Ok(items) => NoteListResponse {
            message: count_message(items.len()),
            items,
        },
        Err(err) => NoteListResponse {
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Creates a note and logs it to the activity feed.
///
/// Empty `category` means `personal`; `all` is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String, content: String, category: String) -> ActionResponse {
    let category = if category.trim().is_empty() {
        Ok(NoteCategory::default())
    } else {
        parse_note_category(&category)
    };
    let result = category.and_then(|category| {
        let note = Note::new(title.trim())
            .with_content(content.trim())
            .with_category(category);
        with_app(|app| app.create_note(note).map_err(|err| err.to_string()))
    });
    match result {
        Ok(id) => ActionResponse::success("Note created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Edits a note and bumps its `updated_at`; `None` fields are kept.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(
    note_id: String,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
) -> ActionResponse {
    let result = parse_record_id(&note_id).and_then(|id| {
        let category = match category {
            Some(raw) => Some(parse_note_category(&raw)?),
            None => None,
        };
        let patch = NotePatch {
            title: title.map(|value| value.trim().to_string()),
            content: content.map(|value| value.trim().to_string()),
            category,
        };
        with_app(|app| {
            app.notes_mut()
                .update(id, &patch)
                .map(|_| id)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(id) => ActionResponse::success("Note updated.", Some(id)),
        Err(err) => ActionResponse::failure(format!("note_update failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ActionResponse {
    let result = parse_record_id(&note_id).and_then(|id| {
        with_app(|app| {
            app.notes_mut()
                .delete(id)
                .map(|()| id)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(id) => ActionResponse::success("Note deleted.", Some(id)),
        Err(err) => ActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Most recent feed entries, newest first.
///
/// `limit` of `None`/`0` means the home screen default; larger values are
/// clamped to the log capacity.
#[flutter_rust_bridge::frb(sync)]
pub fn activities_recent(limit: Option<u32>) -> ActivityListResponse {
    let applied_limit = normalize_feed_limit(limit);
    let now = now_epoch_ms();
    let result = with_app(|app| {
        Ok(app
            .activities()
            .recent(applied_limit as usize)
            .iter()
            .map(|activity| to_activity_item(activity, now))
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => ActivityListResponse {
            message: count_message(items.len()),
            items,
            applied_limit,
        },
        Err(err) => ActivityListResponse {
            items: Vec::new(),
            message: format!("activities_recent failed: {err}"),
            applied_limit,
        },
    }
}

/// Home screen summary for the caller's local `hour` (0-23).
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary(hour: u32) -> DashboardResponse {
    let now = now_epoch_ms();
    let result = with_app(|app| {
        let user_name = app
            .preferences()
            .user_name()
            .map_err(|err| err.to_string())?;
        let snapshot = app.dashboard();
        Ok(DashboardSummary {
            greeting: greeting(hour).to_string(),
            user_name,
            completed_tasks: to_u32(snapshot.completed_tasks),
            total_tasks: to_u32(snapshot.total_tasks),
            notes: to_u32(snapshot.notes),
            progress_percent: progress_percent(snapshot.completed_tasks, snapshot.total_tasks),
            recent_activities: snapshot
                .recent_activities
                .iter()
                .map(|activity| to_activity_item(activity, now))
                .collect(),
        })
    });
    match result {
        Ok(summary) => DashboardResponse {
            summary: Some(summary),
            message: "ok".to_string(),
        },
        Err(err) => DashboardResponse {
            summary: None,
            message: format!("dashboard_summary failed: {err}"),
        },
    }
}

/// Picks a random catalog quote, never the one this returned last time.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_random() -> QuoteResponse {
    let result = with_app(|app| {
        let mut last_quote = LAST_QUOTE.lock().unwrap_or_else(PoisonError::into_inner);
        let quotes = app.quotes_mut();
        if let Some(previous) = *last_quote {
            quotes.set_current(previous).map_err(|err| err.to_string())?;
        }
        let quote = quotes.next_random(&mut thread_rng());
        *last_quote = Some(quote.id);
        Ok(to_quote_item(quote, quotes.is_favorite(quote.id)))
    });
    match result {
        Ok(quote) => QuoteResponse {
            quote: Some(quote),
            message: "ok".to_string(),
        },
        Err(err) => QuoteResponse {
            quote: None,
            message: format!("quote_random failed: {err}"),
        },
    }
}

/// Adds or removes a catalog quote from favorites.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_toggle_favorite(quote_id: String) -> ActionResponse {
    let result = parse_record_id(&quote_id).and_then(|id| {
        with_app(|app| {
            let quotes = app.quotes_mut();
            quotes.set_current(id).map_err(|err| err.to_string())?;
            quotes
                .toggle_favorite()
                .map(|favorited| (id, favorited))
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok((id, true)) => ActionResponse::success("Added to favorites.", Some(id)),
        Ok((id, false)) => ActionResponse::success("Removed from favorites.", Some(id)),
        Err(err) => ActionResponse::failure(format!("quote_toggle_favorite failed: {err}")),
    }
}

/// Drops a quote from favorites without touching the current selection.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_remove_favorite(quote_id: String) -> ActionResponse {
    let result = parse_record_id(&quote_id).and_then(|id| {
        with_app(|app| {
            app.quotes_mut()
                .remove_favorite(id)
                .map(|()| id)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(id) => ActionResponse::success("Removed from favorites.", Some(id)),
        Err(err) => ActionResponse::failure(format!("quote_remove_favorite failed: {err}")),
    }
}

/// Every catalog quote, flagged with its favorite state.
#[flutter_rust_bridge::frb(sync)]
pub fn quotes_catalog() -> QuoteListResponse {
    let result = with_app(|app| {
        let quotes = app.quotes();
        Ok(quotes
            .catalog()
            .iter()
            .map(|quote| to_quote_item(quote, quotes.is_favorite(quote.id)))
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => QuoteListResponse {
            message: count_message(items.len()),
            items,
        },
        Err(err) => QuoteListResponse {
            items: Vec::new(),
            message: format!("quotes_catalog failed: {err}"),
        },
    }
}

/// Favorites in the order they were added.
#[flutter_rust_bridge::frb(sync)]
pub fn quotes_favorites() -> QuoteListResponse {
    let result = with_app(|app| {
        Ok(app
            .quotes()
            .favorites()
            .iter()
            .map(|quote| to_quote_item(quote, true))
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => QuoteListResponse {
            message: count_message(items.len()),
            items,
        },
        Err(err) => QuoteListResponse {
            items: Vec::new(),
            message: format!("quotes_favorites failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_get() -> ProfileResponse {
    let result = with_app(|app| {
        let prefs = app.preferences();
        let user_name = prefs.user_name().map_err(|err| err.to_string())?;
        let onboarded = prefs
            .has_completed_onboarding()
            .map_err(|err| err.to_string())?;
        Ok((user_name, onboarded))
    });
    match result {
        Ok((user_name, has_completed_onboarding)) => ProfileResponse {
            user_name,
            has_completed_onboarding,
            message: "ok".to_string(),
        },
        Err(err) => ProfileResponse {
            user_name: String::new(),
            has_completed_onboarding: false,
            message: format!("profile_get failed: {err}"),
        },
    }
}

/// Stores the display name; blank names are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn user_name_set(name: String) -> ActionResponse {
    match with_app(|app| {
        app.preferences()
            .set_user_name(&name)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => ActionResponse::success("Name saved.", None),
        Err(err) => ActionResponse::failure(format!("user_name_set failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn onboarding_complete() -> ActionResponse {
    match with_app(|app| {
        app.preferences()
            .set_onboarding_completed(true)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => ActionResponse::success("Onboarding completed.", None),
        Err(err) => ActionResponse::failure(format!("onboarding_complete failed: {err}")),
    }
}

/// Wipes tasks, notes, favorites and the feed, and restores default settings.
#[flutter_rust_bridge::frb(sync)]
pub fn reset_all_data() -> ActionResponse {
    match with_app(|app| app.reset_all().map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("All data cleared.", None),
        Err(err) => ActionResponse::failure(format!("reset_all_data failed: {err}")),
    }
}

fn normalize_feed_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => HOME_FEED_LIMIT as u32,
        Some(value) if value > FEED_LIMIT_MAX => FEED_LIMIT_MAX,
        Some(value) => value,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SPARKTASKS_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_app<T>(f: impl FnOnce(&mut AppService<'_>) -> Result<T, String>) -> Result<T, String> {
    // A panicked holder left no partial state behind: every call reloads.
    let _guard = APP_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        error!("event=ffi_call module=ffi status=error stage=db_open error={err}");
        format!("DB open failed: {err}")
    })?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| {
        error!("event=ffi_call module=ffi status=error stage=store_init error={err}");
        format!("store init failed: {err}")
    })?;
    let mut app = AppService::open(&kv, &mut thread_rng()).map_err(|err| {
        error!("event=ffi_call module=ffi status=error stage=load error={err}");
        format!("load failed: {err}")
    })?;
    f(&mut app)
}

fn parse_record_id(raw: &str) -> Result<RecordId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{}`", raw.trim()))
}

/// Empty input means "not given".
fn parse_priority(raw: &str) -> Result<Option<TaskPriority>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    TaskPriority::parse(raw)
        .map(Some)
        .ok_or_else(|| format!("unknown priority `{}`; expected low|medium|high", raw.trim()))
}

fn parse_task_filter(raw: &str) -> Result<TaskFilter, String> {
    TaskFilter::parse(raw).ok_or_else(|| {
        format!(
            "unknown filter `{}`; expected all|pending|completed|high_priority",
            raw.trim()
        )
    })
}

fn parse_note_category(raw: &str) -> Result<NoteCategory, String> {
    NoteCategory::parse(raw).ok_or_else(|| format!("unknown category `{}`", raw.trim()))
}

fn count_message(count: usize) -> String {
    if count == 0 {
        "No results.".to_string()
    } else {
        format!("Found {count} result(s).")
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn priority_label(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "low",
        TaskPriority::Medium => "medium",
        TaskPriority::High => "high",
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        is_completed: task.is_completed,
        priority: priority_label(task.priority).to_string(),
        due_date: task.due_date,
        created_at: task.created_at,
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        category: note.category.title().to_string(),
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

fn to_quote_item(quote: &MotivationalQuote, is_favorite: bool) -> QuoteItem {
    QuoteItem {
        id: quote.id.to_string(),
        text: quote.text.clone(),
        author: quote.author.clone(),
        category: quote.category.title().to_string(),
        is_favorite,
    }
}

fn to_activity_item(activity: &Activity, now: i64) -> ActivityItem {
    ActivityItem {
        id: activity.id.to_string(),
        kind: activity.kind.as_str().to_string(),
        headline: activity.kind.headline().to_string(),
        title: activity.title.clone(),
        subtitle: activity.subtitle.clone(),
        date: activity.date,
        time_ago: time_ago(now, activity.date),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, dashboard_summary, init_logging, normalize_feed_limit, note_create,
        note_delete, note_update, notes_list, ping, quote_random, quote_remove_favorite,
        quote_toggle_favorite, quotes_catalog, quotes_favorites, task_create, task_delete,
        task_toggle, task_update, tasks_list, user_name_set,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn feed_limit_is_defaulted_and_clamped() {
        assert_eq!(normalize_feed_limit(None), 10);
        assert_eq!(normalize_feed_limit(Some(0)), 10);
        assert_eq!(normalize_feed_limit(Some(3)), 3);
        assert_eq!(normalize_feed_limit(Some(99)), 20);
    }

    #[test]
    fn task_lifecycle_through_ffi() {
        let token = unique_token("task");
        let created = task_create(format!("call {token}"), String::new(), "HIGH".to_string(), None);
        assert!(created.ok, "{}", created.message);
        let task_id = created.id.expect("task create should return id");

        let listed = tasks_list("high_priority".to_string(), token.clone());
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].priority, "high");
        assert!(!listed.items[0].is_completed);
        assert_eq!(listed.items[0].due_date, listed.items[0].created_at);

        let toggled = task_toggle(task_id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert_eq!(toggled.message, "Task completed.");
        let completed = tasks_list("completed".to_string(), token.clone());
        assert_eq!(completed.items.len(), 1);

        let updated = task_update(
            task_id.clone(),
            Some(format!("renamed {token}")),
            None,
            Some("low".to_string()),
            None,
        );
        assert!(updated.ok, "{}", updated.message);
        let listed = tasks_list("all".to_string(), token.clone());
        assert_eq!(listed.items[0].title, format!("renamed {token}"));
        assert_eq!(listed.items[0].priority, "low");

        let deleted = task_delete(task_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(tasks_list("all".to_string(), token).items.is_empty());

        let again = task_delete(task_id);
        assert!(!again.ok);
    }

    #[test]
    fn task_create_rejects_bad_input() {
        let blank = task_create("   ".to_string(), String::new(), String::new(), None);
        assert!(!blank.ok);
        let bad_priority =
            task_create("x".to_string(), String::new(), "urgent".to_string(), None);
        assert!(!bad_priority.ok);
        assert!(bad_priority.message.contains("priority"));
        let bad_id = task_toggle("not-a-uuid".to_string());
        assert!(!bad_id.ok);
        assert!(bad_id.message.contains("invalid id"));
    }

    #[test]
    fn note_lifecycle_through_ffi() {
        let token = unique_token("note");
        let created = note_create(format!("Idea {token}"), "body".to_string(), "ideas".to_string());
        assert!(created.ok, "{}", created.message);
        let note_id = created.id.expect("note create should return id");

        let moved = note_update(note_id.clone(), None, None, Some("work".to_string()));
        assert!(moved.ok, "{}", moved.message);

        let work = notes_list("work".to_string(), token.clone());
        assert_eq!(work.items.len(), 1);
        assert_eq!(work.items[0].category, "Work");
        assert!(work.items[0].updated_at >= work.items[0].created_at);
        assert!(notes_list("ideas".to_string(), token.clone()).items.is_empty());

        assert!(note_delete(note_id).ok);
        assert!(notes_list(String::new(), token).items.is_empty());
    }

    #[test]
    fn note_create_rejects_all_category() {
        let response = note_create("x".to_string(), String::new(), "all".to_string());
        assert!(!response.ok);
    }

    #[test]
    fn task_create_keeps_explicit_due_date() {
        let token = unique_token("due");
        let created = task_create(
            format!("pay {token}"),
            String::new(),
            String::new(),
            Some(1_700_000_000_000),
        );
        assert!(created.ok, "{}", created.message);
        let listed = tasks_list("all".to_string(), token);
        assert_eq!(listed.items[0].due_date, 1_700_000_000_000);
    }

    #[test]
    fn quote_favorite_toggles_both_ways() {
        let catalog = quotes_catalog();
        assert_eq!(catalog.items.len(), 25);
        let quote_id = catalog.items[3].id.clone();

        let first = quote_toggle_favorite(quote_id.clone());
        let second = quote_toggle_favorite(quote_id.clone());
        assert!(first.ok && second.ok);
        assert_ne!(first.message, second.message);

        let unknown = quote_toggle_favorite("00000000-0000-0000-0000-000000000000".to_string());
        assert!(!unknown.ok);

        let favorites = quotes_favorites();
        assert!(favorites.items.iter().all(|item| item.is_favorite));
    }

    #[test]
    fn quote_remove_favorite_drops_only_that_quote() {
        let catalog = quotes_catalog();
        let (kept, dropped) = (catalog.items[5].id.clone(), catalog.items[6].id.clone());
        for id in [&kept, &dropped] {
            if !quotes_favorites().items.iter().any(|item| &item.id == id) {
                assert!(quote_toggle_favorite(id.clone()).ok);
            }
        }

        let removed = quote_remove_favorite(dropped.clone());
        assert!(removed.ok, "{}", removed.message);
        let favorites = quotes_favorites();
        assert!(favorites.items.iter().any(|item| item.id == kept));
        assert!(!favorites.items.iter().any(|item| item.id == dropped));

        assert!(!quote_remove_favorite(dropped).ok);
    }

    #[test]
    fn consecutive_random_quotes_never_repeat() {
        let mut previous = quote_random().quote.expect("random quote").id;
        for _ in 0..100 {
            let next = quote_random().quote.expect("random quote").id;
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn dashboard_uses_hour_for_greeting() {
        let response = dashboard_summary(8);
        let summary = response.summary.expect("dashboard summary");
        assert_eq!(summary.greeting, "Good Morning");
        assert!(summary.progress_percent <= 100);
        assert!(summary.completed_tasks <= summary.total_tasks);
        assert!(summary.recent_activities.len() <= 10);
    }

    #[test]
    fn user_name_set_rejects_blank() {
        let response = user_name_set("   ".to_string());
        assert!(!response.ok);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
