use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::AggregationConfig;
use crate::error::{AggregationError, FetchError};
use crate::executor::execute_bounded;
use crate::paginate::paginate;
use crate::source::ArchiveSource;
use crate::types::{CompletedTasks, CompletionInfo, FetchScope, Section, Task};

use super::locator::{
    find_section_ids_with_completed_children, find_task_ids_with_completed_children,
};

/// Result of one aggregation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationOutcome {
    pub completed: CompletedTasks,
    /// Scopes fetched in total (one per scope, regardless of page count).
    pub scope_fetches: usize,
    /// Follow-up rounds run after the seed round.
    pub follow_up_rounds: usize,
}

/// Rebuilds the completed-task set reachable from a project.
///
/// The archive only reports one level of "has completed children" at a time, so
/// after the seed round (project, open tasks, open sections) every freshly fetched
/// batch is scanned for completed tasks that themselves have completed children,
/// and those are fetched in the next round. The loop ends on the first round that
/// discovers nothing new.
pub struct CompletedTaskAggregator {
    source: Arc<dyn ArchiveSource>,
    config: AggregationConfig,
}

impl CompletedTaskAggregator {
    pub fn new(source: Arc<dyn ArchiveSource>, config: AggregationConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// `project_completion_info` is the account-wide completion-info; only entries
    /// pointing at `open_tasks` / `open_sections` lead to seed fetches.
    pub async fn aggregate(
        &self,
        token: &str,
        project_id: &str,
        open_tasks: &[Task],
        open_sections: &[Section],
        project_completion_info: &[CompletionInfo],
    ) -> Result<AggregationOutcome, AggregationError> {
        let fetches = AtomicUsize::new(0);

        let task_ids = find_task_ids_with_completed_children(project_completion_info, open_tasks);
        let section_ids =
            find_section_ids_with_completed_children(project_completion_info, open_sections);

        tracing::debug!(
            target: "taskexport.completed",
            stage = "aggregate.seed",
            project_id = %project_id,
            open_tasks = open_tasks.len(),
            open_sections = open_sections.len(),
            task_targets = task_ids.len(),
            section_targets = section_ids.len()
        );

        let mut seed_scopes = Vec::with_capacity(1 + task_ids.len() + section_ids.len());
        seed_scopes.push(FetchScope::Project(project_id.to_string()));
        seed_scopes.extend(task_ids.into_iter().map(FetchScope::Task));
        seed_scopes.extend(section_ids.into_iter().map(FetchScope::Section));

        let mut batch = self.fetch_round(token, seed_scopes, &fetches).await?;
        let mut accumulated = CompletedTasks::default();
        let mut follow_up_rounds = 0usize;

        loop {
            // Only the freshly fetched batch is scanned, never the cumulative set.
            let follow_up =
                find_task_ids_with_completed_children(&batch.completion_info, &batch.tasks);
            accumulated.merge(batch);

            if follow_up.is_empty() {
                break;
            }

            follow_up_rounds += 1;
            if let Some(max) = self.config.max_rounds {
                if follow_up_rounds > max {
                    tracing::warn!(
                        target: "taskexport.completed",
                        stage = "aggregate.round_limit",
                        project_id = %project_id,
                        max_rounds = max,
                        pending = follow_up.len()
                    );
                    return Err(AggregationError::RoundLimitExceeded(max));
                }
            }

            tracing::debug!(
                target: "taskexport.completed",
                stage = "aggregate.follow_up",
                project_id = %project_id,
                round = follow_up_rounds,
                task_targets = follow_up.len()
            );

            let scopes = follow_up.into_iter().map(FetchScope::Task).collect();
            batch = self.fetch_round(token, scopes, &fetches).await?;
        }

        let outcome = AggregationOutcome {
            completed: accumulated,
            scope_fetches: fetches.load(Ordering::Relaxed),
            follow_up_rounds,
        };

        tracing::info!(
            target: "taskexport.completed",
            stage = "aggregate.done",
            project_id = %project_id,
            tasks = outcome.completed.tasks.len(),
            completion_info = outcome.completed.completion_info.len(),
            scope_fetches = outcome.scope_fetches,
            follow_up_rounds = outcome.follow_up_rounds
        );

        Ok(outcome)
    }

    /// Fetch every scope with bounded concurrency and merge once all have settled.
    /// Merge order follows `scopes`, not completion order.
    async fn fetch_round(
        &self,
        token: &str,
        scopes: Vec<FetchScope>,
        fetches: &AtomicUsize,
    ) -> Result<CompletedTasks, AggregationError> {
        let mut results = execute_bounded(
            scopes.into_iter().enumerate(),
            self.config.max_concurrency,
            |(idx, scope)| async move {
                fetches.fetch_add(1, Ordering::Relaxed);
                let fetched = self.fetch_scope(token, &scope).await;
                match fetched {
                    Ok(completed) => Ok((idx, completed)),
                    // The project-level archive call is best-effort.
                    Err(err) if matches!(scope, FetchScope::Project(_)) => {
                        tracing::warn!(
                            target: "taskexport.completed",
                            stage = "aggregate.project_fetch_failed",
                            scope = %scope,
                            kind = err.kind(),
                            error = %err
                        );
                        Ok((idx, CompletedTasks::default()))
                    }
                    Err(source) => Err(AggregationError::Fetch { scope, source }),
                }
            },
        )
        .await?;

        results.sort_by_key(|(idx, _)| *idx);

        let mut merged = CompletedTasks::default();
        for (_, completed) in results {
            merged.merge(completed);
        }
        Ok(merged)
    }

    async fn fetch_scope(
        &self,
        token: &str,
        scope: &FetchScope,
    ) -> Result<CompletedTasks, FetchError> {
        let source = self.source.as_ref();
        paginate(|cursor| async move {
            let page = source
                .fetch_completed_page(token, scope, cursor.as_deref())
                .await?;
            Ok::<_, FetchError>(page.into_page())
        })
        .await
    }
}
