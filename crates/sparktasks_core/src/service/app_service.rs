//! Application use-case service.
//!
//! # Responsibility
//! - Own one of each store over a shared key-value space.
//! - Record feed activities alongside task/note use-cases.
//! - Provide the global reset used by the settings screen.
//!
//! # Invariants
//! - Feed logging failures never undo or fail the primary mutation.
//! - `reset_all` restores preference defaults before emptying stores.

use crate::kv::KeyValueStore;
use crate::model::activity::{Activity, ActivityType};
use crate::model::note::Note;
use crate::model::record::RecordId;
use crate::model::task::Task;
use crate::service::dashboard::{progress, DashboardSnapshot};
use crate::store::activity_store::{ActivityStore, HOME_FEED_LIMIT};
use crate::store::note_store::NoteStore;
use crate::store::preferences::Preferences;
use crate::store::quote_store::QuoteStore;
use crate::store::task_store::TaskStore;
use crate::store::StoreResult;
use log::{info, warn};
use rand::Rng;

pub struct AppService<'kv> {
    prefs: Preferences<'kv>,
    tasks: TaskStore<'kv>,
    notes: NoteStore<'kv>,
    quotes: QuoteStore<'kv>,
    activities: ActivityStore<'kv>,
}

impl<'kv> AppService<'kv> {
    /// Loads every store from `kv`.
    pub fn open(kv: &'kv dyn KeyValueStore, rng: &mut impl Rng) -> StoreResult<Self> {
        let service = Self {
            prefs: Preferences::new(kv),
            tasks: TaskStore::open(kv)?,
            notes: NoteStore::open(kv)?,
            quotes: QuoteStore::open(kv, rng)?,
            activities: ActivityStore::open(kv)?,
        };
        info!(
            "event=app_open module=service status=ok tasks={} notes={} favorites={} activities={}",
            service.tasks.total_count(),
            service.notes.len(),
            service.quotes.favorites().len(),
            service.activities.len()
        );
        Ok(service)
    }

    pub fn preferences(&self) -> Preferences<'kv> {
        self.prefs
    }

    pub fn tasks(&self) -> &TaskStore<'kv> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskStore<'kv> {
        &mut self.tasks
    }

    pub fn notes(&self) -> &NoteStore<'kv> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore<'kv> {
        &mut self.notes
    }

    pub fn quotes(&self) -> &QuoteStore<'kv> {
        &self.quotes
    }

    pub fn quotes_mut(&mut self) -> &mut QuoteStore<'kv> {
        &mut self.quotes
    }

    pub fn activities(&self) -> &ActivityStore<'kv> {
        &self.activities
    }

    pub fn activities_mut(&mut self) -> &mut ActivityStore<'kv> {
        &mut self.activities
    }

    /// Adds a task and logs a "New Task" feed entry.
    pub fn create_task(&mut self, task: Task) -> StoreResult<RecordId> {
        let title = task.title.clone();
        let id = self.tasks.add(task)?;
        self.log_activity(Activity::new(ActivityType::TaskCreated, "New Task", title));
        Ok(id)
    }

    /// Toggles completion; logs "Task Completed" when the task becomes done.
    pub fn toggle_task(&mut self, id: RecordId) -> StoreResult<bool> {
        let completed = self.tasks.toggle_completion(id)?;
        if completed {
            if let Some(title) = self.tasks.get(id).map(|task| task.title.clone()) {
                self.log_activity(Activity::new(
                    ActivityType::TaskCompleted,
                    "Task Completed",
                    title,
                ));
            }
        }
        Ok(completed)
    }

    /// Adds a note and logs a "Note created" feed entry.
    pub fn create_note(&mut self, note: Note) -> StoreResult<RecordId> {
        let title = note.title.clone();
        let id = self.notes.add(note)?;
        self.log_activity(Activity::new(ActivityType::NoteCreated, "Note created", title));
        Ok(id)
    }

    /// Restores preference defaults and empties all four stores.
    pub fn reset_all(&mut self) -> StoreResult<()> {
        self.prefs.reset_defaults()?;
        self.tasks.reset()?;
        self.notes.reset()?;
        self.quotes.reset()?;
        self.activities.reset()?;
        info!("event=app_reset module=service status=ok");
        Ok(())
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        let completed_tasks = self.tasks.completed_count();
        let total_tasks = self.tasks.total_count();
        DashboardSnapshot {
            completed_tasks,
            total_tasks,
            notes: self.notes.len(),
            progress: progress(completed_tasks, total_tasks),
            recent_activities: self.activities.recent(HOME_FEED_LIMIT).to_vec(),
        }
    }

    fn log_activity(&mut self, activity: Activity) {
        let kind = activity.kind.as_str();
        if let Err(err) = self.activities.add(activity) {
            warn!("event=activity_log module=service status=error kind={kind} error={err}");
        }
    }
}
