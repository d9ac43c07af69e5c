//! Response shapes of the Todoist REST, sync and archive endpoints.

use serde::Deserialize;
use taskexport_core::api::{CompletionInfo, Due, Section, Task};

#[derive(Debug, Clone, Deserialize)]
pub struct SyncDue {
    pub date: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub string: String,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Task object as returned by both the v1 task listing and the archive endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncTask {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due: Option<SyncDue>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub responsible_uid: Option<String>,
    #[serde(default)]
    pub assigned_by_uid: Option<String>,
    #[serde(default)]
    pub added_by_uid: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub child_order: i64,
}

fn default_priority() -> u8 {
    1
}

impl From<SyncDue> for Due {
    fn from(due: SyncDue) -> Self {
        // `datetime` mirrors `date` only for timezone-bound due dates.
        let datetime = due.timezone.as_ref().map(|_| due.date.clone());
        Due {
            date: due.date,
            string: due.string,
            is_recurring: due.is_recurring,
            datetime,
            timezone: due.timezone,
        }
    }
}

impl From<SyncTask> for Task {
    fn from(t: SyncTask) -> Self {
        Task {
            id: t.id,
            project_id: t.project_id,
            parent_id: t.parent_id,
            section_id: t.section_id,
            is_completed: t.checked,
            completed_at: t.completed_at,
            content: t.content,
            description: t.description,
            due: t.due.map(Due::from),
            priority: t.priority,
            assignee_id: t.responsible_uid,
            assigner_id: t.assigned_by_uid,
            creator_id: t.added_by_uid,
            labels: t.labels,
            created_at: t.added_at,
            order: t.child_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncSection {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub section_order: i64,
}

impl From<SyncSection> for Section {
    fn from(s: SyncSection) -> Self {
        Section {
            id: s.id,
            project_id: s.project_id,
            name: s.name,
            order: s.section_order,
        }
    }
}

/// Cursor-paginated v1 listing (`/tasks`, `/sections`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Archive endpoint page.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveResponse {
    pub items: Vec<SyncTask>,
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
    pub completed_info: Vec<CompletionInfo>,
}

/// Sync endpoint response restricted to `completed_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedInfoResponse {
    pub completed_info: Vec<CompletionInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sync_task_maps_to_task() {
        let raw = serde_json::json!({
            "id": "6X7rM8997g3RQmvh",
            "project_id": "6Jf8VQXxpwv56VQ7",
            "section_id": null,
            "parent_id": "6X7rfFVPjhvv84XG",
            "checked": true,
            "completed_at": "2024-02-01T10:00:00.000000Z",
            "content": "Buy milk",
            "description": "",
            "priority": 4,
            "responsible_uid": null,
            "added_by_uid": "2671355",
            "labels": ["errand"],
            "added_at": "2024-01-01T09:00:00.000000Z",
            "child_order": 3,
            "deadline": null,
            "duration": null,
            "is_deleted": false
        });
        let task: Task = serde_json::from_value::<SyncTask>(raw).unwrap().into();
        assert_eq!(task.parent_id.as_deref(), Some("6X7rfFVPjhvv84XG"));
        assert_eq!(task.section_id, None);
        assert!(task.is_completed);
        assert_eq!(task.priority, 4);
        assert_eq!(task.creator_id.as_deref(), Some("2671355"));
        assert_eq!(task.labels, vec!["errand".to_string()]);
        assert_eq!(task.order, 3);
    }

    #[test]
    fn test_due_with_timezone_sets_datetime() {
        let due: Due = SyncDue {
            date: "2024-05-01T12:00:00".to_string(),
            is_recurring: false,
            string: "May 1 at noon".to_string(),
            timezone: Some("Europe/Lisbon".to_string()),
        }
        .into();
        assert_eq!(due.datetime.as_deref(), Some("2024-05-01T12:00:00"));
        assert_eq!(due.timezone.as_deref(), Some("Europe/Lisbon"));
    }

    #[test]
    fn test_due_without_timezone_has_no_datetime() {
        let due: Due = SyncDue {
            date: "2024-05-01".to_string(),
            is_recurring: true,
            string: "every day".to_string(),
            timezone: None,
        }
        .into();
        assert_eq!(due.datetime, None);
        assert!(due.is_recurring);
    }

    #[test]
    fn test_archive_response_requires_items() {
        let err = serde_json::from_str::<ArchiveResponse>(r#"{"has_more":false}"#).unwrap_err();
        assert!(err.to_string().contains("items"));
    }

    #[test]
    fn test_archive_response_requires_has_more_and_completed_info() {
        let err = serde_json::from_str::<ArchiveResponse>(r#"{"items":[],"completed_info":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("has_more"));

        let err = serde_json::from_str::<ArchiveResponse>(r#"{"items":[],"has_more":false}"#)
            .unwrap_err();
        assert!(err.to_string().contains("completed_info"));
    }

    #[test]
    fn test_archive_response_rejects_info_without_count() {
        let err = serde_json::from_str::<ArchiveResponse>(
            r#"{"items":[],"has_more":false,"completed_info":[{"item_id":"t1"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("completed_items"));
    }

    #[test]
    fn test_archive_response_decodes_completion_info() {
        let page: ArchiveResponse = serde_json::from_str(
            r#"{
                "items": [],
                "has_more": true,
                "next_cursor": "abc",
                "completed_info": [
                    {"item_id": "t1", "completed_items": 2},
                    {"section_id": "s1", "completed_items": 1}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            page.completed_info,
            vec![CompletionInfo::task("t1", 2), CompletionInfo::section("s1", 1)]
        );
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    }
}
