use std::collections::{BTreeSet, HashSet};

use crate::types::{CompletionInfo, CompletionScope, Section, Task};

/// Ids of tasks in `tasks` that some task-scoped hint in `completion_info` refers to.
///
/// Presence of the hint is what counts; `completed_items` is not inspected.
/// Hints for ids outside `tasks` are ignored.
pub fn find_task_ids_with_completed_children(
    completion_info: &[CompletionInfo],
    tasks: &[Task],
) -> BTreeSet<String> {
    let active: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    completion_info
        .iter()
        .filter_map(|info| match &info.scope {
            CompletionScope::Task(id) if active.contains(id.as_str()) => Some(id.clone()),
            _ => None,
        })
        .collect()
}

/// Section counterpart of [`find_task_ids_with_completed_children`].
pub fn find_section_ids_with_completed_children(
    completion_info: &[CompletionInfo],
    sections: &[Section],
) -> BTreeSet<String> {
    let active: HashSet<&str> = sections.iter().map(|s| s.id.as_str()).collect();
    completion_info
        .iter()
        .filter_map(|info| match &info.scope {
            CompletionScope::Section(id) if active.contains(id.as_str()) => Some(id.clone()),
            _ => None,
        })
        .collect()
}
