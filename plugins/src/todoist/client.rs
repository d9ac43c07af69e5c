use async_trait::async_trait;
use serde::de::DeserializeOwned;
use taskexport_core::api::{
    paginate, ApiConfig, ArchivePage, ArchiveSource, CompletionInfo, FetchError, FetchScope, Page,
    ProjectSource, Section, Task,
};

use super::error::{preview_body, TodoistHttpError};
use super::wire::{ArchiveResponse, CompletedInfoResponse, ListResponse, SyncSection, SyncTask};

async fn parse_json_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, TodoistHttpError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| TodoistHttpError::from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(TodoistHttpError::status_error(status.as_u16(), url, preview));
    }

    serde_json::from_str::<T>(&body).map_err(|err| {
        let preview = preview_body(&body);
        TodoistHttpError::decode_error(status.as_u16(), url, err, preview)
    })
}

/// Client for the Todoist REST, sync and archive endpoints.
#[derive(Clone)]
pub struct TodoistClient {
    http: reqwest::Client,
    page_limit: u32,
    // Pre-built URL endpoints
    url_tasks: String,
    url_sections: String,
    url_sync: String,
    url_archive: String,
}

impl TodoistClient {
    pub fn new(cfg: &ApiConfig) -> anyhow::Result<Self> {
        Self::with_urls(
            &cfg.rest_base_url,
            &cfg.archive_url,
            cfg.page_limit,
            cfg.timeout_ms,
        )
    }

    pub fn with_urls(
        rest_base_url: &str,
        archive_url: &str,
        page_limit: u32,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = rest_base_url.trim_end_matches('/');
        Ok(Self {
            http,
            page_limit: page_limit.max(1),
            url_tasks: format!("{}/tasks", normalized),
            url_sections: format!("{}/sections", normalized),
            url_sync: format!("{}/sync", normalized),
            url_archive: archive_url.to_string(),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
        token: &str,
    ) -> Result<T, TodoistHttpError> {
        let resp = req
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| TodoistHttpError::from_reqwest(err, url.to_string()))?;
        parse_json_response(resp).await
    }

    /// One page of a v1 listing filtered by project.
    async fn list_page<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
        project_id: &str,
        cursor: Option<&str>,
    ) -> Result<ListResponse<T>, TodoistHttpError> {
        let limit = self.page_limit.to_string();
        let mut req = self
            .http
            .get(url)
            .query(&[("project_id", project_id), ("limit", limit.as_str())]);
        if let Some(cursor) = cursor {
            req = req.query(&[("cursor", cursor)]);
        }
        self.send_json(req, url, token).await
    }

    async fn list_all<W, T>(
        &self,
        url: &str,
        token: &str,
        project_id: &str,
    ) -> Result<Vec<T>, FetchError>
    where
        W: DeserializeOwned + Into<T> + Send,
        T: Send,
    {
        let items: Vec<T> = paginate(|cursor| async move {
            let page = self
                .list_page::<W>(url, token, project_id, cursor.as_deref())
                .await?;
            Ok::<_, FetchError>(Page {
                items: page.results.into_iter().map(Into::into).collect(),
                next_cursor: page.next_cursor,
            })
        })
        .await?;

        tracing::debug!(
            target: "taskexport.todoist",
            stage = "todoist.http.list.out",
            url = %url,
            project_id = %project_id,
            items = items.len()
        );
        Ok(items)
    }
}

#[async_trait]
impl ArchiveSource for TodoistClient {
    fn name(&self) -> &str {
        "todoist"
    }

    async fn fetch_completed_page(
        &self,
        token: &str,
        scope: &FetchScope,
        cursor: Option<&str>,
    ) -> Result<ArchivePage, FetchError> {
        let url = &self.url_archive;
        let (param, id) = scope.query_param();
        let limit = self.page_limit.to_string();
        tracing::debug!(
            target: "taskexport.todoist",
            stage = "todoist.http.archive.in",
            url = %url,
            scope = %scope,
            has_cursor = cursor.is_some()
        );

        let mut req = self
            .http
            .get(url)
            .query(&[("limit", limit.as_str()), (param, id)]);
        if let Some(cursor) = cursor {
            req = req.query(&[("cursor", cursor)]);
        }
        let page: ArchiveResponse = self.send_json(req, url, token).await?;

        tracing::debug!(
            target: "taskexport.todoist",
            stage = "todoist.http.archive.out",
            scope = %scope,
            items = page.items.len(),
            completed_info = page.completed_info.len(),
            has_more = page.has_more
        );

        Ok(ArchivePage {
            items: page.items.into_iter().map(Task::from).collect(),
            has_more: page.has_more,
            next_cursor: page.next_cursor,
            completion_info: page.completed_info,
        })
    }

    async fn fetch_completion_info(&self, token: &str) -> Result<Vec<CompletionInfo>, FetchError> {
        let url = &self.url_sync;
        tracing::debug!(
            target: "taskexport.todoist",
            stage = "todoist.http.completed_info.in",
            url = %url
        );
        let req = self.http.post(url).form(&[
            ("sync_token", "*"),
            ("resource_types", r#"["completed_info"]"#),
        ]);
        let resp: CompletedInfoResponse = self.send_json(req, url, token).await?;
        tracing::debug!(
            target: "taskexport.todoist",
            stage = "todoist.http.completed_info.out",
            entries = resp.completed_info.len()
        );
        Ok(resp.completed_info)
    }
}

#[async_trait]
impl ProjectSource for TodoistClient {
    async fn fetch_open_tasks(&self, token: &str, project_id: &str) -> Result<Vec<Task>, FetchError> {
        self.list_all::<SyncTask, Task>(&self.url_tasks, token, project_id)
            .await
    }

    async fn fetch_sections(
        &self,
        token: &str,
        project_id: &str,
    ) -> Result<Vec<Section>, FetchError> {
        self.list_all::<SyncSection, Section>(&self.url_sections, token, project_id)
            .await
    }
}
