//! Full-data snapshot types (bulk replace import/export)
//!
//! Import types carry no `id` or `user_id` fields at all: whatever the client
//! sends for them is dropped by serde, so ids are always reassigned by the
//! server and ownership is always the caller's.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tag::Tag;
use super::task::{DurationUnit, NotificationOption, TaskFull};

/// Tag entry of an imported snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTag {
    pub name: String,
}

/// Tag reference nested inside an imported task, matched by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTagRef {
    pub name: String,
}

/// Task entry of an imported snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTask {
    pub name: String,
    pub duration: i32,
    pub duration_unit: DurationUnit,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub repeating: bool,
    pub notification_option: NotificationOption,
    #[serde(default)]
    pub tags: Vec<SnapshotTagRef>,
}

/// Full snapshot sent by a client to replace all of its data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FullDataImport {
    #[serde(default)]
    pub tasks: Vec<SnapshotTask>,
    #[serde(default)]
    pub tags: Vec<SnapshotTag>,
}

/// Snapshot as persisted, with server-assigned ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullData {
    pub tasks: Vec<TaskFull>,
    pub tags: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_drops_ids_and_owners() {
        let import: FullDataImport = serde_json::from_str(
            r#"{
                "user_id": 5,
                "tags": [{"id": "old-tag", "user_id": 5, "name": "bills"}],
                "tasks": [{
                    "id": "old-task", "user_id": 5, "name": "Pay rent",
                    "duration": 1, "duration_unit": "month", "repeating": true,
                    "notification_option": "overdue",
                    "tags": [{"id": "old-tag", "user_id": 5, "name": "bills"}]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(import.tags, vec![SnapshotTag { name: "bills".into() }]);
        assert_eq!(import.tasks.len(), 1);
        assert_eq!(
            import.tasks[0].tags,
            vec![SnapshotTagRef { name: "bills".into() }]
        );
    }

    #[test]
    fn test_import_defaults_to_empty() {
        let import: FullDataImport = serde_json::from_str("{}").unwrap();
        assert!(import.tasks.is_empty());
        assert!(import.tags.is_empty());
    }
}
