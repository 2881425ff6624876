//! Note store persisted under `savedNotes`.

use super::record_store::{LoadStatus, RecordStore, StorePolicy};
use super::{keys, StoreResult};
use crate::kv::KeyValueStore;
use crate::model::note::{Note, NoteCategory, NotePatch};
use crate::model::record::{now_epoch_ms, RecordId};

pub const NOTES_POLICY: StorePolicy = StorePolicy::appending(keys::NOTES);

pub struct NoteStore<'kv> {
    records: RecordStore<'kv, Note>,
}

impl<'kv> NoteStore<'kv> {
    pub fn open(kv: &'kv dyn KeyValueStore) -> StoreResult<Self> {
        Ok(Self {
            records: RecordStore::open(kv, NOTES_POLICY)?,
        })
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.records.load_status()
    }

    pub fn notes(&self) -> &[Note] {
        self.records.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&Note> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, note: Note) -> StoreResult<RecordId> {
        self.records.add(note)
    }

    /// Applies the patch and stamps `updated_at` with the current time.
    pub fn update(&mut self, id: RecordId, patch: &NotePatch) -> StoreResult<&Note> {
        self.update_at(id, patch, now_epoch_ms())
    }

    /// Same as `update` with an explicit edit time.
    pub fn update_at(&mut self, id: RecordId, patch: &NotePatch, now: i64) -> StoreResult<&Note> {
        self.records.update(id, |note| patch.apply(note, now))
    }

    pub fn delete(&mut self, id: RecordId) -> StoreResult<()> {
        self.records.delete(id).map(|_| ())
    }

    pub fn reset(&mut self) -> StoreResult<()> {
        self.records.reset()
    }

    /// Notes in `category` matching `search`, newest `created_at` first.
    pub fn filtered(&self, category: NoteCategory, search: &str) -> Vec<&Note> {
        let mut notes = self
            .notes()
            .iter()
            .filter(|note| note.matches(category, search))
            .collect::<Vec<_>>();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }

    pub fn reload(&mut self) -> StoreResult<&LoadStatus> {
        self.records.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::kv::MemoryKvStore;
    use crate::model::note::{Note, NoteCategory, NotePatch};
    use crate::model::record::ValidationError;
    use crate::store::StoreError;
    use uuid::Uuid;

    #[test]
    fn filtered_sorts_newest_first() {
        let kv = MemoryKvStore::new();
        let mut store = NoteStore::open(&kv).unwrap();
        store.add(Note::with_id(Uuid::new_v4(), "old", 1_000)).unwrap();
        store.add(Note::with_id(Uuid::new_v4(), "new", 3_000)).unwrap();
        store.add(Note::with_id(Uuid::new_v4(), "mid", 2_000)).unwrap();

        let titles = store
            .filtered(NoteCategory::All, "")
            .into_iter()
            .map(|note| note.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn update_at_refreshes_timestamp() {
        let kv = MemoryKvStore::new();
        let mut store = NoteStore::open(&kv).unwrap();
        let id = store
            .add(Note::with_id(Uuid::new_v4(), "draft", 1_000))
            .unwrap();

        let patch = NotePatch {
            content: Some("body".to_string()),
            ..NotePatch::default()
        };
        let note = store.update_at(id, &patch, 4_000).unwrap();
        assert_eq!(note.updated_at, 4_000);
        assert_eq!(note.created_at, 1_000);
    }

    #[test]
    fn update_to_filter_only_category_is_rejected() {
        let kv = MemoryKvStore::new();
        let mut store = NoteStore::open(&kv).unwrap();
        let id = store
            .add(Note::new("Idea").with_category(NoteCategory::Ideas))
            .unwrap();

        let patch = NotePatch {
            category: Some(NoteCategory::All),
            ..NotePatch::default()
        };
        let err = store.update(id, &patch).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::FilterOnlyCategory)
        ));
        assert_eq!(store.get(id).map(|n| n.category), Some(NoteCategory::Ideas));
    }
}
