//! Note record and category model.
//!
//! # Invariants
//! - `updated_at >= created_at` at all times.
//! - `NoteCategory::All` is never stored on a note.

use crate::model::record::{
    matches_search, now_epoch_ms, require_text, Record, RecordId, ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    /// Filter-only pseudo-category.
    All,
    #[default]
    Personal,
    Work,
    Ideas,
    Reminders,
    Quotes,
}

impl NoteCategory {
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Personal,
        Self::Work,
        Self::Ideas,
        Self::Reminders,
        Self::Quotes,
    ];

    /// Categories a note can actually be filed under.
    pub const SELECTABLE: [Self; 5] = [
        Self::Personal,
        Self::Work,
        Self::Ideas,
        Self::Reminders,
        Self::Quotes,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Ideas => "Ideas",
            Self::Reminders => "Reminders",
            Self::Quotes => "Quotes",
        }
    }

    pub fn is_filter_only(self) -> bool {
        self == Self::All
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "personal" => Some(Self::Personal),
            "work" => Some(Self::Work),
            "ideas" => Some(Self::Ideas),
            "reminders" => Some(Self::Reminders),
            "quotes" => Some(Self::Quotes),
            _ => None,
        }
    }

    /// Returns whether a note filed under `category` passes this filter.
    pub fn admits(self, category: NoteCategory) -> bool {
        self == Self::All || self == category
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds; refreshed on every edit.
    pub updated_at: i64,
}

impl Note {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, now_epoch_ms())
    }

    pub fn with_id(id: RecordId, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            category: NoteCategory::default(),
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_category(mut self, category: NoteCategory) -> Self {
        self.category = category;
        self
    }

    /// Marks the note as edited at `now`.
    ///
    /// Clamped to `created_at` so a clock step backwards cannot break ordering.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now.max(self.created_at);
    }

    pub fn matches(&self, category: NoteCategory, search: &str) -> bool {
        category.admits(self.category)
            && matches_search(search, &[self.title.as_str(), self.content.as_str()])
    }
}

impl Record for Note {
    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        if self.category.is_filter_only() {
            return Err(ValidationError::FilterOnlyCategory);
        }
        if self.updated_at < self.created_at {
            return Err(ValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}

/// Partial update for note fields. Applying it always refreshes `updated_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<NoteCategory>,
}

impl NotePatch {
    pub fn apply(&self, note: &mut Note, now: i64) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(category) = self.category {
            note.category = category;
        }
        note.touch(now);
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteCategory, NotePatch};
    use crate::model::record::{Record, ValidationError};
    use uuid::Uuid;

    #[test]
    fn all_category_is_rejected_on_write() {
        let note = Note::new("Idea").with_category(NoteCategory::All);
        assert_eq!(note.validate(), Err(ValidationError::FilterOnlyCategory));
    }

    #[test]
    fn touch_never_moves_before_creation() {
        let mut note = Note::with_id(Uuid::new_v4(), "clock", 5_000);
        note.touch(1_000);
        assert_eq!(note.updated_at, 5_000);
        note.touch(9_000);
        assert_eq!(note.updated_at, 9_000);
        assert!(note.validate().is_ok());
    }

    #[test]
    fn patch_refreshes_updated_at_even_without_field_changes() {
        let mut note = Note::with_id(Uuid::new_v4(), "same", 1_000);
        NotePatch::default().apply(&mut note, 2_000);
        assert_eq!(note.title, "same");
        assert_eq!(note.updated_at, 2_000);
    }

    #[test]
    fn all_filter_admits_every_category() {
        for category in NoteCategory::SELECTABLE {
            assert!(NoteCategory::All.admits(category));
        }
        assert!(!NoteCategory::Work.admits(NoteCategory::Ideas));
    }

    #[test]
    fn matches_searches_title_and_content() {
        let note = Note::new("Groceries")
            .with_content("eggs and FLOUR")
            .with_category(NoteCategory::Reminders);
        assert!(note.matches(NoteCategory::All, "flour"));
        assert!(note.matches(NoteCategory::Reminders, "grocer"));
        assert!(!note.matches(NoteCategory::Work, ""));
    }

    #[test]
    fn every_category_title_parses_back() {
        for category in NoteCategory::ALL {
            assert_eq!(NoteCategory::parse(category.title()), Some(category));
        }
        assert_eq!(
            NoteCategory::ALL.iter().filter(|c| c.is_filter_only()).count(),
            1
        );
    }
}
