//! Reconstruction of a project's full completed-task set from the archive.

mod aggregator;
mod locator;

pub use aggregator::{AggregationOutcome, CompletedTaskAggregator};
pub use locator::{find_section_ids_with_completed_children, find_task_ids_with_completed_children};
