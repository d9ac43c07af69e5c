use thiserror::Error;

use super::fetch::{AggregationError, FetchError};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("fetching open tasks failed: {0}")]
    OpenTasks(#[source] FetchError),
    #[error("fetching sections failed: {0}")]
    Sections(#[source] FetchError),
    #[error("fetching completion info failed: {0}")]
    CompletionInfo(#[source] FetchError),
    #[error("aggregating completed tasks failed: {0}")]
    Completed(#[from] AggregationError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
