use chrono::{DateTime, Local};
use taskexport_core::api::{AppConfig, CliError, CompletionInfo, CompletionScope, Task};

use super::cli::CompletedArgs;
use super::export::effective_config;

pub async fn handle_completed(args: CompletedArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let cfg = effective_config(cfg, &args.project);
    let exporter = taskexport_plugins::factory::build_exporter(&cfg)?;

    let outcome = exporter
        .completed_tasks(&args.project.token, &args.project.project_id)
        .await?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome.completed)
            .map_err(|e| CliError::Command(format!("serialize completed tasks: {e}")))?;
        println!("{json}");
        return Ok(0);
    }

    for task in &outcome.completed.tasks {
        println!("{}", task_line(task));
    }
    for info in &outcome.completed.completion_info {
        println!("{}", info_line(info));
    }
    println!(
        "{} completed task(s), {} scope fetch(es), {} follow-up round(s)",
        outcome.completed.tasks.len(),
        outcome.scope_fetches,
        outcome.follow_up_rounds
    );
    Ok(0)
}

/// Completion time in local time, falling back to the raw value when it is not RFC 3339.
pub fn completed_at_display(raw: Option<&str>) -> String {
    match raw {
        Some(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            Err(_) => s.to_string(),
        },
        None => "-".to_string(),
    }
}

pub fn task_line(task: &Task) -> String {
    let parent = task.parent_id.as_deref().unwrap_or("-");
    format!(
        "{:<16}  {:<20}  parent={:<20}  {}",
        completed_at_display(task.completed_at.as_deref()),
        task.id,
        parent,
        task.content
    )
}

pub fn info_line(info: &CompletionInfo) -> String {
    let (kind, id) = match &info.scope {
        CompletionScope::Project(id) => ("project", id),
        CompletionScope::Task(id) => ("task", id),
        CompletionScope::Section(id) => ("section", id),
    };
    format!("info {kind}:{id} completed_items={}", info.completed_items)
}
