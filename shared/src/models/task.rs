//! Task Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tag::{Tag, TagSpec};

/// Unit of a task's repeat interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DurationUnit {
    Day,
    Week,
    Month,
    Year,
}

/// When the owner wants to be reminded about a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum NotificationOption {
    Never,
    Overdue,
    OverdueDue,
}

/// Task row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Task {
    pub id: String,
    pub user_id: i64,
    pub name: String,
    /// 1..=999 units of `duration_unit`
    pub duration: i32,
    pub duration_unit: DurationUnit,
    pub start_date: NaiveDate,
    pub repeating: bool,
    pub notification_option: NotificationOption,
}

/// Task with its materialized tag set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFull {
    #[serde(flatten)]
    pub task: Task,
    pub tags: Vec<Tag>,
}

impl TaskFull {
    /// Tag ids, sorted, for set comparisons
    pub fn tag_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.tags.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids
    }
}

/// Create/update task payload
///
/// `tags: None` on update keeps the current associations; `Some(vec![])`
/// clears them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPayload {
    pub name: String,
    pub duration: i32,
    pub duration_unit: DurationUnit,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub repeating: bool,
    pub notification_option: NotificationOption,
    #[serde(default)]
    pub tags: Option<Vec<TagSpec>>,
}

/// Result of completing a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "task", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The task was repeating; this is its next occurrence
    Successor(TaskFull),
    /// The task was one-off and is gone
    NoSuccessor,
}

impl CompletionOutcome {
    pub fn successor(&self) -> Option<&TaskFull> {
        match self {
            Self::Successor(task) => Some(task),
            Self::NoSuccessor => None,
        }
    }
}
