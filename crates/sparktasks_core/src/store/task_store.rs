//! Task store.
//!
//! # Responsibility
//! - Persist tasks under `savedTasks` in insertion order.
//! - Mirror completed/total counts into preferences after count changes.
//!
//! # Invariants
//! - `completed_count()` is recomputed from the sequence on every call.
//! - A failed counter mirror is logged; it never fails the task mutation that
//!   already persisted.

use super::preferences::Preferences;
use super::record_store::{LoadStatus, RecordStore, StorePolicy};
use super::{keys, StoreResult};
use crate::kv::KeyValueStore;
use crate::model::record::RecordId;
use crate::model::task::{Task, TaskFilter, TaskPatch};
use log::warn;

pub const TASKS_POLICY: StorePolicy = StorePolicy::appending(keys::TASKS);

pub struct TaskStore<'kv> {
    records: RecordStore<'kv, Task>,
    prefs: Preferences<'kv>,
}

impl<'kv> TaskStore<'kv> {
    pub fn open(kv: &'kv dyn KeyValueStore) -> StoreResult<Self> {
        Ok(Self {
            records: RecordStore::open(kv, TASKS_POLICY)?,
            prefs: Preferences::new(kv),
        })
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.records.load_status()
    }

    pub fn tasks(&self) -> &[Task] {
        self.records.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&Task> {
        self.records.get(id)
    }

    pub fn add(&mut self, task: Task) -> StoreResult<RecordId> {
        let id = self.records.add(task)?;
        self.mirror_counters();
        Ok(id)
    }

    /// Applies title/description/priority/due-date edits.
    pub fn update(&mut self, id: RecordId, patch: &TaskPatch) -> StoreResult<&Task> {
        self.records.update(id, |task| patch.apply(task))
    }

    /// Flips completion and returns the new state.
    pub fn toggle_completion(&mut self, id: RecordId) -> StoreResult<bool> {
        let completed = self
            .records
            .update(id, |task| task.is_completed = !task.is_completed)?
            .is_completed;
        self.mirror_counters();
        Ok(completed)
    }

    pub fn delete(&mut self, id: RecordId) -> StoreResult<()> {
        self.records.delete(id)?;
        self.mirror_counters();
        Ok(())
    }

    /// Empties the store and zeroes both mirrored counters.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.records.reset()?;
        self.mirror_counters();
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.tasks().iter().filter(|task| task.is_completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    /// Tasks passing `filter` and `search`, in stored order.
    pub fn filtered(&self, filter: TaskFilter, search: &str) -> Vec<&Task> {
        self.tasks()
            .iter()
            .filter(|task| filter.matches(task, search))
            .collect()
    }

    pub fn reload(&mut self) -> StoreResult<&LoadStatus> {
        self.records.reload()
    }

    fn mirror_counters(&self) {
        let (completed, total) = (self.completed_count(), self.total_count());
        if let Err(err) = self.prefs.set_task_counters(completed, total) {
            warn!(
                "event=task_counters module=store status=error completed={completed} total={total} error={err}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::kv::{KeyValueStore, KvError, KvResult, MemoryKvStore};
    use crate::model::task::{Task, TaskPatch, TaskPriority};
    use crate::store::preferences::Preferences;
    use crate::store::{keys, StoreError};
    use uuid::Uuid;

    /// Rejects writes to the counter keys only.
    struct CounterlessKv {
        inner: MemoryKvStore,
    }

    impl KeyValueStore for CounterlessKv {
        fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> KvResult<()> {
            if key == keys::COMPLETED_TASKS_COUNT || key == keys::TOTAL_TASKS_COUNT {
                return Err(KvError::Backend("counters unavailable".to_string()));
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> KvResult<()> {
            self.inner.delete(key)
        }

        fn clear(&self) -> KvResult<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn counters_follow_add_toggle_delete() {
        let kv = MemoryKvStore::new();
        let prefs = Preferences::new(&kv);
        let mut store = TaskStore::open(&kv).unwrap();

        let id = store.add(Task::new("Buy milk")).unwrap();
        assert_eq!(prefs.total_tasks_count().unwrap(), 1);
        assert_eq!(prefs.completed_tasks_count().unwrap(), 0);

        assert!(store.toggle_completion(id).unwrap());
        assert_eq!(prefs.completed_tasks_count().unwrap(), 1);

        store.delete(id).unwrap();
        assert_eq!(prefs.total_tasks_count().unwrap(), 0);
        assert_eq!(prefs.completed_tasks_count().unwrap(), 0);
    }

    #[test]
    fn toggle_twice_restores_open_state() {
        let kv = MemoryKvStore::new();
        let mut store = TaskStore::open(&kv).unwrap();
        let id = store.add(Task::new("flip")).unwrap();

        assert!(store.toggle_completion(id).unwrap());
        assert!(!store.toggle_completion(id).unwrap());
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn update_keeps_identity_and_creation_time() {
        let kv = MemoryKvStore::new();
        let mut store = TaskStore::open(&kv).unwrap();
        let task = Task::new("draft");
        let (id, created_at) = (task.id, task.created_at);
        store.add(task).unwrap();

        let patch = TaskPatch {
            title: Some("final".to_string()),
            priority: Some(TaskPriority::Low),
            due_date: Some(created_at + 86_400_000),
            ..TaskPatch::default()
        };
        let updated = store.update(id, &patch).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.title, "final");
        assert_eq!(updated.due_date, created_at + 86_400_000);
    }

    #[test]
    fn toggle_unknown_id_is_not_found() {
        let kv = MemoryKvStore::new();
        let mut store = TaskStore::open(&kv).unwrap();
        let missing = Uuid::new_v4();
        let err = store.toggle_completion(missing).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    }

    #[test]
    fn counter_write_failure_keeps_task_mutations_successful() {
        let kv = CounterlessKv {
            inner: MemoryKvStore::new(),
        };
        let mut store = TaskStore::open(&kv).unwrap();

        let id = store.add(Task::new("saved anyway")).unwrap();
        assert!(store.toggle_completion(id).unwrap());

        let reopened = TaskStore::open(&kv).unwrap();
        assert!(reopened.get(id).unwrap().is_completed);
        assert!(!kv.inner.contains_key(keys::TOTAL_TASKS_COUNT));

        store.delete(id).unwrap();
        store.reset().unwrap();
    }
}
