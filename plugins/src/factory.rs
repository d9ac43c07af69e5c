use std::sync::Arc;

use anyhow::Result;

use taskexport_core::api::{ApiConfig, AppConfig, ProjectExporter};

use crate::todoist::TodoistClient;

pub fn build_todoist(cfg: &ApiConfig) -> Result<Arc<TodoistClient>> {
    Ok(Arc::new(TodoistClient::new(cfg)?))
}

/// Exporter wired to one shared Todoist client for both listings and the archive.
pub fn build_exporter(cfg: &AppConfig) -> Result<ProjectExporter> {
    let client = build_todoist(&cfg.api)?;
    Ok(ProjectExporter::new(
        client.clone(),
        client,
        cfg.aggregation.clone(),
    ))
}
