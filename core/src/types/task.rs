use serde::{Deserialize, Serialize};

/// A task as exported. Open tasks and archived (completed) tasks share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    /// Only set for completed tasks.
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub assigner_id: Option<String>,
    #[serde(default)]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub order: i64,
}

fn default_priority() -> u8 {
    1
}

impl Task {
    /// Minimal task used by tests and fixtures; descriptive fields are left empty.
    pub fn new(id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            parent_id: None,
            section_id: None,
            is_completed: false,
            completed_at: None,
            content: String::new(),
            description: String::new(),
            due: None,
            priority: default_priority(),
            assignee_id: None,
            assigner_id: None,
            creator_id: None,
            labels: Vec::new(),
            created_at: None,
            order: 0,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn completed(mut self, completed_at: impl Into<String>) -> Self {
        self.is_completed = true;
        self.completed_at = Some(completed_at.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Due {
    pub date: String,
    pub string: String,
    pub is_recurring: bool,
    /// Present only when the due date carries a timezone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub order: i64,
}
