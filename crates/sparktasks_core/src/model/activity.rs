//! Activity feed entries.

use crate::model::record::{now_epoch_ms, Record, RecordId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    TaskCompleted,
    NoteCreated,
    TaskCreated,
}

impl ActivityType {
    /// Headline shown in the recent-activity feed.
    pub fn headline(self) -> &'static str {
        match self {
            Self::TaskCompleted => "Task Completed",
            Self::NoteCreated => "Note Created",
            Self::TaskCreated => "New Task",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskCompleted => "taskCompleted",
            Self::NoteCreated => "noteCreated",
            Self::TaskCreated => "taskCreated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub title: String,
    pub subtitle: String,
    /// Unix epoch milliseconds.
    pub date: i64,
}

impl Activity {
    pub fn new(kind: ActivityType, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            subtitle: subtitle.into(),
            date: now_epoch_ms(),
        }
    }

    pub fn at(mut self, date: i64) -> Self {
        self.date = date;
        self
    }
}

impl Record for Activity {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::{Activity, ActivityType};

    #[test]
    fn kind_serializes_under_type_key() {
        let activity = Activity::new(ActivityType::NoteCreated, "Note created", "Idea").at(42);
        let value = serde_json::to_value(&activity).expect("activity should serialize");
        assert_eq!(value["type"], "noteCreated");
        assert_eq!(value["date"], 42);
    }

    #[test]
    fn as_str_matches_serialized_form() {
        let value = serde_json::to_value(ActivityType::TaskCompleted).expect("serialize");
        assert_eq!(value, ActivityType::TaskCompleted.as_str());
    }
}
