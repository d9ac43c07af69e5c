use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::{CompletionInfo, FetchScope, Section, Task};

use super::page::ArchivePage;

/// The archive endpoint serving completed tasks, plus the account-wide completion-info sync.
///
/// The bearer `token` is passed per call and only ever read.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_completed_page(
        &self,
        token: &str,
        scope: &FetchScope,
        cursor: Option<&str>,
    ) -> Result<ArchivePage, FetchError>;

    async fn fetch_completion_info(&self, token: &str) -> Result<Vec<CompletionInfo>, FetchError>;
}

/// Listings of a project's currently open tasks and sections.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_open_tasks(&self, token: &str, project_id: &str)
        -> Result<Vec<Task>, FetchError>;

    async fn fetch_sections(&self, token: &str, project_id: &str)
        -> Result<Vec<Section>, FetchError>;
}
