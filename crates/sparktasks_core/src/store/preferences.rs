//! Scalar preference values kept next to the record stores.
//!
//! # Invariants
//! - Absent or undecodable values read as their defaults.
//! - `reset_defaults` wipes the whole key space before writing defaults.

use super::{keys, StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::model::record::require_text;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const DEFAULT_USER_NAME: &str = "User";

/// Typed accessors over the preference keys.
#[derive(Clone, Copy)]
pub struct Preferences<'kv> {
    kv: &'kv dyn KeyValueStore,
}

impl<'kv> Preferences<'kv> {
    pub fn new(kv: &'kv dyn KeyValueStore) -> Self {
        Self { kv }
    }

    pub fn user_name(&self) -> StoreResult<String> {
        Ok(self
            .read::<String>(keys::USER_NAME)?
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()))
    }

    /// Stores a trimmed, non-blank display name.
    pub fn set_user_name(&self, name: &str) -> StoreResult<()> {
        require_text("user_name", name)?;
        self.write(keys::USER_NAME, &name.trim())
    }

    pub fn has_completed_onboarding(&self) -> StoreResult<bool> {
        Ok(self
            .read::<bool>(keys::HAS_COMPLETED_ONBOARDING)?
            .unwrap_or(false))
    }

    pub fn set_onboarding_completed(&self, completed: bool) -> StoreResult<()> {
        self.write(keys::HAS_COMPLETED_ONBOARDING, &completed)
    }

    /// Last mirrored completed-task count.
    pub fn completed_tasks_count(&self) -> StoreResult<usize> {
        Ok(self.read::<usize>(keys::COMPLETED_TASKS_COUNT)?.unwrap_or(0))
    }

    /// Last mirrored total-task count.
    pub fn total_tasks_count(&self) -> StoreResult<usize> {
        Ok(self.read::<usize>(keys::TOTAL_TASKS_COUNT)?.unwrap_or(0))
    }

    pub fn set_task_counters(&self, completed: usize, total: usize) -> StoreResult<()> {
        self.write(keys::COMPLETED_TASKS_COUNT, &completed)?;
        self.write(keys::TOTAL_TASKS_COUNT, &total)
    }

    /// Clears every key, then restores the post-reset defaults.
    ///
    /// Onboarding stays marked as completed so a reset does not replay it.
    pub fn reset_defaults(&self) -> StoreResult<()> {
        self.kv.clear()?;
        self.write(keys::USER_NAME, &DEFAULT_USER_NAME)?;
        self.set_task_counters(0, 0)?;
        self.set_onboarding_completed(true)?;
        info!("event=prefs_reset module=store status=ok");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(bytes) = self.kv.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                warn!("event=prefs_read module=store status=degraded key={key} reason=decode_failed");
                Ok(None)
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value).map_err(StoreError::Encode)?;
        self.kv.set(key, &bytes)?;
        Ok(())
    }
}
