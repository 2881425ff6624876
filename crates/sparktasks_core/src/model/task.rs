//! Task record and task list filters.
//!
//! # Invariants
//! - `id` and `created_at` are fixed at construction.
//! - `title` is never blank once stored.

use crate::model::record::{
    matches_search, now_epoch_ms, require_text, Record, RecordId, ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task urgency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Display label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses the serialized form (`low|medium|high`), case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub priority: TaskPriority,
    /// Unix epoch milliseconds.
    pub due_date: i64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an open, medium-priority task due now.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, now_epoch_ms())
    }

    /// Creates a task with caller-provided identity and creation time.
    pub fn with_id(id: RecordId, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            is_completed: false,
            priority: TaskPriority::default(),
            due_date: created_at,
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: i64) -> Self {
        self.due_date = due_date;
        self
    }
}

impl Record for Task {
    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

/// Partial update for the editable task fields.
///
/// `None` leaves the field untouched. Completion is changed through
/// `TaskStore::toggle_completion`, not through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<i64>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

/// Task list filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    HighPriority,
}

impl TaskFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Pending, Self::Completed, Self::HighPriority];

    pub fn title(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Active",
            Self::Completed => "Completed",
            Self::HighPriority => "Important",
        }
    }

    /// Parses `all|pending|completed|highPriority` (also snake_case).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "pending" | "active" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "highpriority" | "high_priority" | "important" => Some(Self::HighPriority),
            _ => None,
        }
    }

    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.is_completed,
            Self::Completed => task.is_completed,
            Self::HighPriority => task.priority == TaskPriority::High,
        }
    }

    /// Applies the filter tab and a free-text search over title/description.
    pub fn matches(self, task: &Task, search: &str) -> bool {
        matches_search(search, &[task.title.as_str(), task.description.as_str()])
            && self.accepts(task)
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskFilter, TaskPatch, TaskPriority};
    use crate::model::record::{Record, ValidationError};

    #[test]
    fn new_task_uses_defaults() {
        let task = Task::new("Buy milk");
        assert!(!task.is_completed);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.description.is_empty());
        assert_eq!(task.due_date, task.created_at);
    }

    #[test]
    fn blank_title_fails_validation() {
        let task = Task::new("  ");
        assert_eq!(task.validate(), Err(ValidationError::Blank("title")));
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let mut task = Task::new("draft").with_description("keep me");
        TaskPatch {
            priority: Some(TaskPriority::High),
            ..TaskPatch::default()
        }
        .apply(&mut task);
        assert_eq!(task.title, "draft");
        assert_eq!(task.description, "keep me");
        assert_eq!(task.priority, TaskPriority::High);
    }

    #[test]
    fn serialized_shape_uses_camel_case_keys() {
        let task = Task::new("shape").with_priority(TaskPriority::Low);
        let value = serde_json::to_value(&task).expect("task should serialize");
        assert_eq!(value["isCompleted"], false);
        assert_eq!(value["priority"], "low");
        assert!(value.get("dueDate").is_some());
    }

    #[test]
    fn filter_combines_tab_and_search() {
        let urgent = Task::new("Call mom").with_priority(TaskPriority::High);
        let mut done = Task::new("Buy milk").with_description("2 liters");
        done.is_completed = true;

        assert!(TaskFilter::HighPriority.matches(&urgent, ""));
        assert!(!TaskFilter::HighPriority.matches(&done, ""));
        assert!(TaskFilter::Completed.matches(&done, "LITERS"));
        assert!(!TaskFilter::Pending.matches(&done, ""));
        assert!(!TaskFilter::All.matches(&urgent, "milk"));
    }

    #[test]
    fn filter_parse_accepts_display_aliases() {
        assert_eq!(TaskFilter::parse("highPriority"), Some(TaskFilter::HighPriority));
        assert_eq!(TaskFilter::parse("Active"), Some(TaskFilter::Pending));
        assert_eq!(TaskFilter::parse(""), Some(TaskFilter::All));
        assert_eq!(TaskFilter::parse("soon"), None);
    }

    #[test]
    fn every_label_parses_back() {
        for priority in TaskPriority::ALL {
            let value = serde_json::to_value(priority).expect("priority should serialize");
            assert_eq!(TaskPriority::parse(value.as_str().unwrap()), Some(priority));
            assert_eq!(TaskPriority::parse(priority.title()), Some(priority));
        }
        for filter in TaskFilter::ALL {
            assert_eq!(TaskFilter::parse(filter.title()), Some(filter));
        }
    }
}
