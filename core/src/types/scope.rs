use std::fmt;

/// Unit of archive request batching: one filter, one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchScope {
    Project(String),
    /// Children of the given task.
    Task(String),
    Section(String),
}

impl FetchScope {
    /// Archive query parameter name and value for this scope.
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            Self::Project(id) => ("project_id", id),
            Self::Task(id) => ("parent_id", id),
            Self::Section(id) => ("section_id", id),
        }
    }

    pub fn id(&self) -> &str {
        self.query_param().1
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::Task(_) => "task",
            Self::Section(_) => "section",
        }
    }
}

impl fmt::Display for FetchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}
