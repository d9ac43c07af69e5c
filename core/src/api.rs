//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskexport_core::api` instead of reaching into internal modules.

pub use crate::completed::{
    find_section_ids_with_completed_children, find_task_ids_with_completed_children,
    AggregationOutcome, CompletedTaskAggregator,
};
pub use crate::config::{
    load_default, AggregationConfig, ApiConfig, AppConfig, LoggingConfig,
};
pub use crate::error::{AggregationError, CliError, ExportError, FetchError};
pub use crate::executor::{execute_bounded, DEFAULT_MAX_CONCURRENCY};
pub use crate::export::{ExportRequest, ProjectExport, ProjectExporter};
pub use crate::paginate::{paginate, Page, PageItems};
pub use crate::source::{ArchivePage, ArchiveSource, ProjectSource};
pub use crate::types::{
    CompletedTasks, CompletionInfo, CompletionScope, Due, FetchScope, Section, Task,
};
