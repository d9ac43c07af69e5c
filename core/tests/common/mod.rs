#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use taskexport_core::api::{
    ArchivePage, ArchiveSource, CompletionInfo, FetchError, FetchScope, ProjectSource, Section,
    Task,
};

pub const PROJECT: &str = "1234";
pub const TOKEN: &str = "kwijibo";

/// In-memory archive. Each scope holds a list of pages; the cursor of page `n`
/// is the string `n`.
#[derive(Default)]
pub struct FakeArchive {
    pages: HashMap<FetchScope, Vec<(Vec<Task>, Vec<CompletionInfo>)>>,
    failing: HashSet<FetchScope>,
    account_info: Vec<CompletionInfo>,
    info_fails: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<(FetchScope, Option<String>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    info_calls: AtomicUsize,
}

impl FakeArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page to `scope`.
    pub fn scope(
        mut self,
        scope: FetchScope,
        tasks: Vec<Task>,
        info: Vec<CompletionInfo>,
    ) -> Self {
        self.pages.entry(scope).or_default().push((tasks, info));
        self
    }

    pub fn failing(mut self, scope: FetchScope) -> Self {
        self.failing.insert(scope);
        self
    }

    pub fn account_info(mut self, info: Vec<CompletionInfo>) -> Self {
        self.account_info = info;
        self
    }

    pub fn info_fails(mut self) -> Self {
        self.info_fails = true;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(FetchScope, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Scopes requested from their first page, in call order.
    pub fn scopes_fetched(&self) -> Vec<FetchScope> {
        self.calls()
            .into_iter()
            .filter(|(_, cursor)| cursor.is_none())
            .map(|(scope, _)| scope)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArchiveSource for FakeArchive {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_completed_page(
        &self,
        _token: &str,
        scope: &FetchScope,
        cursor: Option<&str>,
    ) -> Result<ArchivePage, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((scope.clone(), cursor.map(str::to_string)));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(scope) {
            return Err(FetchError::transient(anyhow::anyhow!(
                "archive unavailable for {scope}"
            )));
        }

        let index: usize = match cursor {
            Some(c) => c
                .parse()
                .map_err(|_| FetchError::Malformed(format!("bad cursor {c}")))?,
            None => 0,
        };
        let pages = self.pages.get(scope).map(Vec::as_slice).unwrap_or(&[]);
        let (items, completion_info) = pages.get(index).cloned().unwrap_or_default();
        let has_more = index + 1 < pages.len();

        Ok(ArchivePage {
            items,
            has_more,
            next_cursor: has_more.then(|| (index + 1).to_string()),
            completion_info,
        })
    }

    async fn fetch_completion_info(
        &self,
        _token: &str,
    ) -> Result<Vec<CompletionInfo>, FetchError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        if self.info_fails {
            return Err(FetchError::transient(anyhow::anyhow!("sync unavailable")));
        }
        Ok(self.account_info.clone())
    }
}

#[derive(Default)]
pub struct FakeProjects {
    pub tasks: Vec<Task>,
    pub sections: Vec<Section>,
    pub section_calls: AtomicUsize,
}

#[async_trait]
impl ProjectSource for FakeProjects {
    async fn fetch_open_tasks(
        &self,
        _token: &str,
        project_id: &str,
    ) -> Result<Vec<Task>, FetchError> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn fetch_sections(
        &self,
        _token: &str,
        project_id: &str,
    ) -> Result<Vec<Section>, FetchError> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .sections
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect())
    }
}

pub fn open(id: &str) -> Task {
    Task::new(id, PROJECT)
}

pub fn done(id: &str, parent: &str) -> Task {
    Task::new(id, PROJECT)
        .with_parent(parent)
        .completed("2024-03-01T12:00:00Z")
}

pub fn section(id: &str) -> Section {
    Section {
        id: id.to_string(),
        project_id: PROJECT.to_string(),
        name: format!("Section {id}"),
        order: 1,
    }
}

pub fn task_scope(id: &str) -> FetchScope {
    FetchScope::Task(id.to_string())
}

pub fn project_scope() -> FetchScope {
    FetchScope::Project(PROJECT.to_string())
}

/// Scopes as sorted display strings, for comparisons that ignore request order.
pub fn sorted_scopes(scopes: Vec<FetchScope>) -> Vec<String> {
    let mut names: Vec<String> = scopes.iter().map(ToString::to_string).collect();
    names.sort();
    names
}

pub fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
