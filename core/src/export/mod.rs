//! Project export: open tasks, optionally followed by every completed task.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::completed::{AggregationOutcome, CompletedTaskAggregator};
use crate::config::AggregationConfig;
use crate::error::ExportError;
use crate::source::{ArchiveSource, ProjectSource};
use crate::types::{Section, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub project_id: String,
    pub include_completed: bool,
    pub include_sections: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExport {
    pub project_id: String,
    /// Open tasks first, then completed ones.
    pub tasks: Vec<Task>,
    pub sections: Vec<Section>,
    pub completed_count: usize,
}

pub struct ProjectExporter {
    projects: Arc<dyn ProjectSource>,
    archive: Arc<dyn ArchiveSource>,
    aggregator: CompletedTaskAggregator,
}

impl ProjectExporter {
    pub fn new(
        projects: Arc<dyn ProjectSource>,
        archive: Arc<dyn ArchiveSource>,
        aggregation: AggregationConfig,
    ) -> Self {
        let aggregator = CompletedTaskAggregator::new(archive.clone(), aggregation);
        Self {
            projects,
            archive,
            aggregator,
        }
    }

    pub fn aggregator(&self) -> &CompletedTaskAggregator {
        &self.aggregator
    }

    /// Any failure aborts the export; nothing partial is returned.
    pub async fn export_project(
        &self,
        token: &str,
        request: &ExportRequest,
    ) -> Result<ProjectExport, ExportError> {
        let project_id = request.project_id.as_str();

        let mut tasks = self
            .projects
            .fetch_open_tasks(token, project_id)
            .await
            .map_err(ExportError::OpenTasks)?;

        let sections = if request.include_sections || request.include_completed {
            self.projects
                .fetch_sections(token, project_id)
                .await
                .map_err(ExportError::Sections)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            target: "taskexport.export",
            stage = "export.open",
            project_id = %project_id,
            open_tasks = tasks.len(),
            sections = sections.len()
        );

        let mut completed_count = 0;
        if request.include_completed {
            let outcome = self
                .aggregate_completed(token, project_id, &tasks, &sections)
                .await?;
            completed_count = outcome.completed.tasks.len();
            tasks.extend(outcome.completed.tasks);
        }

        tracing::info!(
            target: "taskexport.export",
            stage = "export.done",
            source = %self.archive.name(),
            project_id = %project_id,
            tasks = tasks.len(),
            completed = completed_count
        );

        Ok(ProjectExport {
            project_id: project_id.to_string(),
            tasks,
            sections,
            completed_count,
        })
    }

    /// Completed tasks only, without building the export document.
    pub async fn completed_tasks(
        &self,
        token: &str,
        project_id: &str,
    ) -> Result<AggregationOutcome, ExportError> {
        let tasks = self
            .projects
            .fetch_open_tasks(token, project_id)
            .await
            .map_err(ExportError::OpenTasks)?;
        let sections = self
            .projects
            .fetch_sections(token, project_id)
            .await
            .map_err(ExportError::Sections)?;
        self.aggregate_completed(token, project_id, &tasks, &sections)
            .await
    }

    async fn aggregate_completed(
        &self,
        token: &str,
        project_id: &str,
        tasks: &[Task],
        sections: &[Section],
    ) -> Result<AggregationOutcome, ExportError> {
        let completion_info = self
            .archive
            .fetch_completion_info(token)
            .await
            .map_err(ExportError::CompletionInfo)?;

        self.aggregator
            .aggregate(token, project_id, tasks, sections, &completion_info)
            .await
            .map_err(ExportError::from)
    }
}
