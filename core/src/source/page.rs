use crate::paginate::Page;
use crate::types::{CompletedTasks, CompletionInfo, Task};

/// One page of the archive endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchivePage {
    pub items: Vec<Task>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
    pub completion_info: Vec<CompletionInfo>,
}

impl ArchivePage {
    /// Continuation cursor. `has_more == false` or an empty cursor ends the stream.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_more {
            return None;
        }
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }

    pub fn into_page(self) -> Page<CompletedTasks> {
        let next_cursor = self.next_cursor().map(str::to_string);
        Page {
            items: CompletedTasks::new(self.items, self.completion_info),
            next_cursor,
        }
    }
}
