use serde::{Deserialize, Serialize};

use crate::executor::DEFAULT_MAX_CONCURRENCY;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "taskexport_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Endpoints of the task-management service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST base: open tasks, sections and the sync endpoint live under it.
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,

    /// Archive endpoint serving completed tasks.
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Page size requested from paginated endpoints.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_rest_base_url() -> String {
    "https://api.todoist.com/api/v1".to_string()
}

fn default_archive_url() -> String {
    "https://api.todoist.com/api/v9.223/archive/items".to_string()
}

fn default_page_limit() -> u32 {
    100
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            rest_base_url: default_rest_base_url(),
            archive_url: default_archive_url(),
            page_limit: default_page_limit(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Cap on archive requests in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Optional cap on follow-up rounds. Unset means run until no new ids appear.
    #[serde(default)]
    pub max_rounds: Option<usize>,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            max_rounds: None,
        }
    }
}
