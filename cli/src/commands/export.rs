use taskexport_core::api::{AppConfig, CliError, ExportRequest};
use tokio::io::AsyncWriteExt;

use super::cli::{ExportArgs, ProjectArgs};

/// Config with command line overrides applied on top of the loaded file.
pub fn effective_config(cfg: &AppConfig, project: &ProjectArgs) -> AppConfig {
    let mut cfg = cfg.clone();
    if let Some(n) = project.max_concurrency {
        cfg.aggregation.max_concurrency = n;
    }
    cfg
}

pub async fn handle_export(args: ExportArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let cfg = effective_config(cfg, &args.project);
    let exporter = taskexport_plugins::factory::build_exporter(&cfg)?;

    let request = ExportRequest {
        project_id: args.project.project_id.clone(),
        include_completed: args.include_completed,
        include_sections: args.include_sections,
    };
    let export = exporter
        .export_project(&args.project.token, &request)
        .await?;

    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| CliError::Command(format!("serialize export: {e}")))?;

    match args.output.as_deref() {
        Some(path) => {
            tokio::fs::write(path, format!("{json}\n")).await?;
            tracing::info!(
                target: "taskexport.cli",
                stage = "export.written",
                path = %path,
                tasks = export.tasks.len()
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_config_overrides_concurrency() {
        let project = ProjectArgs {
            project_id: "123".to_string(),
            token: "abc".to_string(),
            max_concurrency: Some(2),
        };
        let cfg = effective_config(&AppConfig::default(), &project);
        assert_eq!(cfg.aggregation.max_concurrency, 2);
    }

    #[test]
    fn test_effective_config_keeps_file_value() {
        let mut base = AppConfig::default();
        base.aggregation.max_concurrency = 7;
        let project = ProjectArgs {
            project_id: "123".to_string(),
            token: "abc".to_string(),
            max_concurrency: None,
        };
        assert_eq!(effective_config(&base, &project).aggregation.max_concurrency, 7);
    }
}
