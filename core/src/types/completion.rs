use serde::{Deserialize, Serialize};

use super::task::Task;

/// The scope a completion hint refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompletionScope {
    Project(String),
    Task(String),
    Section(String),
}

/// "This scope has `completed_items` completed descendants."
///
/// On the wire this is an object carrying exactly one of `project_id`, `item_id`
/// or `section_id`. Anything else fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCompletionInfo", into = "RawCompletionInfo")]
pub struct CompletionInfo {
    pub scope: CompletionScope,
    pub completed_items: u64,
}

impl CompletionInfo {
    pub fn project(id: impl Into<String>, completed_items: u64) -> Self {
        Self {
            scope: CompletionScope::Project(id.into()),
            completed_items,
        }
    }

    pub fn task(id: impl Into<String>, completed_items: u64) -> Self {
        Self {
            scope: CompletionScope::Task(id.into()),
            completed_items,
        }
    }

    pub fn section(id: impl Into<String>, completed_items: u64) -> Self {
        Self {
            scope: CompletionScope::Section(id.into()),
            completed_items,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawCompletionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section_id: Option<String>,
    completed_items: u64,
}

impl TryFrom<RawCompletionInfo> for CompletionInfo {
    type Error = String;

    fn try_from(raw: RawCompletionInfo) -> Result<Self, Self::Error> {
        let scope = match (raw.project_id, raw.item_id, raw.section_id) {
            (Some(id), None, None) => CompletionScope::Project(id),
            (None, Some(id), None) => CompletionScope::Task(id),
            (None, None, Some(id)) => CompletionScope::Section(id),
            (None, None, None) => {
                return Err("completion info carries no project_id, item_id or section_id".into())
            }
            _ => return Err("completion info carries more than one scope id".into()),
        };
        Ok(Self {
            scope,
            completed_items: raw.completed_items,
        })
    }
}

impl From<CompletionInfo> for RawCompletionInfo {
    fn from(info: CompletionInfo) -> Self {
        let mut raw = RawCompletionInfo {
            completed_items: info.completed_items,
            ..Default::default()
        };
        match info.scope {
            CompletionScope::Project(id) => raw.project_id = Some(id),
            CompletionScope::Task(id) => raw.item_id = Some(id),
            CompletionScope::Section(id) => raw.section_id = Some(id),
        }
        raw
    }
}

/// Append-only accumulator of completed tasks and the hints seen while fetching them.
///
/// No de-duplication: a task fetched under two scopes appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTasks {
    pub tasks: Vec<Task>,
    pub completion_info: Vec<CompletionInfo>,
}

impl CompletedTasks {
    pub fn new(tasks: Vec<Task>, completion_info: Vec<CompletionInfo>) -> Self {
        Self {
            tasks,
            completion_info,
        }
    }

    pub fn merge(&mut self, other: CompletedTasks) {
        self.tasks.extend(other.tasks);
        self.completion_info.extend(other.completion_info);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.completion_info.is_empty()
    }
}
