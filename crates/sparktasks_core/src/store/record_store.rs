//! Generic ordered, id-keyed, persisted sequence.
//!
//! # Responsibility
//! - Own the in-memory sequence for one record type.
//! - Serialize the whole sequence to JSON under one key after each mutation.
//! - Apply the insert position and eviction policy of the owning store.
//!
//! # Invariants
//! - Missing or undecodable blobs load as an empty sequence (`LoadStatus`).
//! - Lookups are linear scans; sequences are expected to stay small.
//! - When a write fails, the in-memory change is kept and the error returned.

use super::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::model::record::{Record, RecordId, ValidationError};
use log::{debug, error, info, warn};

/// Where `add` places a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Tail,
    Head,
}

/// Bound applied after each insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    Unbounded,
    /// Keep only the `n` most recently added records.
    KeepNewest(usize),
}

/// Per-store configuration for `RecordStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePolicy {
    pub key: &'static str,
    pub insert: InsertPosition,
    pub eviction: Eviction,
}

impl StorePolicy {
    /// Appends at the tail and never evicts.
    pub const fn appending(key: &'static str) -> Self {
        Self {
            key,
            insert: InsertPosition::Tail,
            eviction: Eviction::Unbounded,
        }
    }

    /// Prepends at the head and keeps at most `capacity` records.
    pub const fn newest_first(key: &'static str, capacity: usize) -> Self {
        Self {
            key,
            insert: InsertPosition::Head,
            eviction: Eviction::KeepNewest(capacity),
        }
    }
}

/// Outcome of reading the persisted blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Key was absent; store starts empty.
    Missing,
    /// Blob decoded into this many records.
    Loaded(usize),
    /// Blob existed but could not be decoded; store starts empty.
    Corrupt(String),
}

pub struct RecordStore<'kv, R: Record> {
    kv: &'kv dyn KeyValueStore,
    policy: StorePolicy,
    records: Vec<R>,
    load_status: LoadStatus,
}

impl<'kv, R: Record> RecordStore<'kv, R> {
    /// Loads the sequence stored under `policy.key`.
    ///
    /// # Errors
    /// - `StoreError::Storage` when the backend read fails. Decode failures are
    ///   not errors; see `load_status()`.
    pub fn open(kv: &'kv dyn KeyValueStore, policy: StorePolicy) -> StoreResult<Self> {
        let mut store = Self {
            kv,
            policy,
            records: Vec::new(),
            load_status: LoadStatus::Missing,
        };
        store.reload()?;
        Ok(store)
    }

    /// Replaces the in-memory sequence with what is persisted.
    pub fn reload(&mut self) -> StoreResult<&LoadStatus> {
        let key = self.policy.key;
        let blob = self.kv.get(key).map_err(|err| {
            error!("event=store_load module=store status=error key={key} error={err}");
            StoreError::Storage(err)
        })?;

        let (records, status) = match blob {
            None => (Vec::new(), LoadStatus::Missing),
            Some(bytes) => match serde_json::from_slice::<Vec<R>>(&bytes) {
                Ok(records) => {
                    let count = records.len();
                    (records, LoadStatus::Loaded(count))
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=degraded key={key} bytes={} reason=decode_failed",
                        bytes.len()
                    );
                    (Vec::new(), LoadStatus::Corrupt(err.to_string()))
                }
            },
        };

        self.records = records;
        self.evict();
        info!(
            "event=store_load module=store status=ok key={key} records={}",
            self.records.len()
        );
        self.load_status = status;
        Ok(&self.load_status)
    }

    pub fn policy(&self) -> StorePolicy {
        self.policy
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// The ordered sequence.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.position(id).is_some()
    }

    /// Inserts a record per policy, evicts overflow, then persists.
    pub fn add(&mut self, record: R) -> StoreResult<RecordId> {
        record.validate()?;
        let id = record.id();
        match self.policy.insert {
            InsertPosition::Tail => self.records.push(record),
            InsertPosition::Head => self.records.insert(0, record),
        }

        let evicted = self.evict();
        if evicted > 0 {
            debug!(
                "event=store_evict module=store status=ok key={} evicted={evicted}",
                self.policy.key
            );
        }

        self.persist()?;
        Ok(id)
    }

    /// Edits one record in place, then persists.
    ///
    /// The edit runs on a copy; the stored record only changes when the edited
    /// copy keeps its id and passes validation.
    pub fn update(&mut self, id: RecordId, edit: impl FnOnce(&mut R)) -> StoreResult<&R> {
        let Some(index) = self.position(id) else {
            debug!(
                "event=store_update module=store status=not_found key={} id={id}",
                self.policy.key
            );
            return Err(StoreError::NotFound(id));
        };

        let mut candidate = self.records[index].clone();
        edit(&mut candidate);
        if candidate.id() != id {
            return Err(ValidationError::IdChanged {
                expected: id,
                found: candidate.id(),
            }
            .into());
        }
        candidate.validate()?;

        self.records[index] = candidate;
        self.persist()?;
        Ok(&self.records[index])
    }

    /// Removes every record with `id`, then persists. Returns the removed count.
    pub fn delete(&mut self, id: RecordId) -> StoreResult<usize> {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        let removed = before - self.records.len();
        if removed == 0 {
            debug!(
                "event=store_delete module=store status=not_found key={} id={id}",
                self.policy.key
            );
            return Err(StoreError::NotFound(id));
        }

        self.persist()?;
        Ok(removed)
    }

    /// Empties the sequence and persists the empty state.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.records.clear();
        self.persist()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn evict(&mut self) -> usize {
        let Eviction::KeepNewest(capacity) = self.policy.eviction else {
            return 0;
        };
        if self.records.len() <= capacity {
            return 0;
        }

        let excess = self.records.len() - capacity;
        match self.policy.insert {
            InsertPosition::Head => self.records.truncate(capacity),
            InsertPosition::Tail => {
                self.records.drain(..excess);
            }
        }
        excess
    }

    fn persist(&self) -> StoreResult<()> {
        let key = self.policy.key;
        let blob = serde_json::to_vec(&self.records).map_err(|err| {
            error!("event=store_write module=store status=error key={key} error_code=encode_failed");
            StoreError::Encode(err)
        })?;

        if let Err(err) = self.kv.set(key, &blob) {
            error!(
                "event=store_write module=store status=error key={key} records={} error_code=write_failed error={err}",
                self.records.len()
            );
            return Err(err.into());
        }

        debug!(
            "event=store_write module=store status=ok key={key} records={} bytes={}",
            self.records.len(),
            blob.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadStatus, RecordStore, StorePolicy};
    use crate::kv::{KeyValueStore, MemoryKvStore};
    use crate::model::record::ValidationError;
    use crate::model::task::Task;
    use crate::store::StoreError;
    use uuid::Uuid;

    const KEY: &str = "records";

    #[test]
    fn tail_policy_with_cap_drops_oldest_from_front() {
        let kv = MemoryKvStore::new();
        let policy = StorePolicy {
            eviction: super::Eviction::KeepNewest(2),
            ..StorePolicy::appending(KEY)
        };
        let mut store = RecordStore::<Task>::open(&kv, policy).unwrap();
        assert_eq!(store.policy(), policy);

        for title in ["one", "two", "three"] {
            store.add(Task::new(title)).unwrap();
        }

        let titles = store
            .records()
            .iter()
            .map(|task| task.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["two", "three"]);
    }

    #[test]
    fn update_rejects_identity_rewrite_without_writing() {
        let kv = MemoryKvStore::new();
        let mut store = RecordStore::<Task>::open(&kv, StorePolicy::appending(KEY)).unwrap();
        let id = store.add(Task::new("stable")).unwrap();
        let blob_before = kv.get(KEY).unwrap();

        let err = store
            .update(id, |task| task.id = Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::IdChanged { expected, .. }) if expected == id
        ));
        assert_eq!(kv.get(KEY).unwrap(), blob_before);
        assert_eq!(store.get(id).map(|task| task.title.as_str()), Some("stable"));
    }

    #[test]
    fn invalid_add_leaves_store_untouched() {
        let kv = MemoryKvStore::new();
        let mut store = RecordStore::<Task>::open(&kv, StorePolicy::appending(KEY)).unwrap();

        let err = store.add(Task::new("")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::Blank("title"))));
        assert!(store.is_empty());
        assert!(!kv.contains_key(KEY));
    }

    #[test]
    fn load_status_reflects_blob_state() {
        let kv = MemoryKvStore::new();
        let store = RecordStore::<Task>::open(&kv, StorePolicy::appending(KEY)).unwrap();
        assert_eq!(store.load_status(), &LoadStatus::Missing);

        kv.set(KEY, b"[]").unwrap();
        let store = RecordStore::<Task>::open(&kv, StorePolicy::appending(KEY)).unwrap();
        assert_eq!(store.load_status(), &LoadStatus::Loaded(0));

        kv.set(KEY, b"{not json").unwrap();
        let store = RecordStore::<Task>::open(&kv, StorePolicy::appending(KEY)).unwrap();
        assert!(matches!(store.load_status(), LoadStatus::Corrupt(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn oversized_blob_is_trimmed_on_load() {
        let kv = MemoryKvStore::new();
        let tasks = (0..5).map(|i| Task::new(format!("t{i}"))).collect::<Vec<_>>();
        kv.set(KEY, &serde_json::to_vec(&tasks).unwrap()).unwrap();

        let store = RecordStore::<Task>::open(&kv, StorePolicy::newest_first(KEY, 3)).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[0].title, "t0");
    }
}
