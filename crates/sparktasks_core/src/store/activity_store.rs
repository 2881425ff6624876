//! Recent-activity log persisted under `recent_activities`.
//!
//! # Invariants
//! - Newest entry first.
//! - At most `ACTIVITY_LOG_CAPACITY` entries; older ones are evicted on add.

use super::record_store::{LoadStatus, RecordStore, StorePolicy};
use super::{keys, StoreResult};
use crate::kv::KeyValueStore;
use crate::model::activity::Activity;
use crate::model::record::RecordId;

pub const ACTIVITY_LOG_CAPACITY: usize = 20;
/// Entries shown on the home feed.
pub const HOME_FEED_LIMIT: usize = 10;

pub const ACTIVITIES_POLICY: StorePolicy =
    StorePolicy::newest_first(keys::ACTIVITIES, ACTIVITY_LOG_CAPACITY);

pub struct ActivityStore<'kv> {
    records: RecordStore<'kv, Activity>,
}

impl<'kv> ActivityStore<'kv> {
    pub fn open(kv: &'kv dyn KeyValueStore) -> StoreResult<Self> {
        Ok(Self {
            records: RecordStore::open(kv, ACTIVITIES_POLICY)?,
        })
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.records.load_status()
    }

    pub fn activities(&self) -> &[Activity] {
        self.records.records()
    }

    /// Up to `limit` newest entries.
    pub fn recent(&self, limit: usize) -> &[Activity] {
        let activities = self.activities();
        &activities[..limit.min(activities.len())]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, activity: Activity) -> StoreResult<RecordId> {
        self.records.add(activity)
    }

    pub fn delete(&mut self, id: RecordId) -> StoreResult<()> {
        self.records.delete(id).map(|_| ())
    }

    pub fn reset(&mut self) -> StoreResult<()> {
        self.records.reset()
    }

    pub fn reload(&mut self) -> StoreResult<&LoadStatus> {
        self.records.reload()
    }
}
