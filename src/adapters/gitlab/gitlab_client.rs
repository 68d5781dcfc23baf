use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::core::errors::{AuditExportError, Result};
use crate::core::models::gitlab::{Branch, Commit, MergeRequest, Project};
use crate::core::traits::remote_source::RemoteSource;

/// Page size requested from every listing endpoint.
const PER_PAGE: &str = "100";

/// Pause between two page fetches of the same listing.
const PAGE_DELAY: Duration = Duration::from_millis(100);

/// Response header carrying the next page number.
const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Header GitLab reads access tokens from (`PRIVATE-TOKEN`).
const TOKEN_HEADER: &str = "private-token";

/// Blocking client for the GitLab REST API (v4).
///
/// Holds the base address, token and TLS policy for the whole run. The
/// async HTTP client is driven by a private current-thread runtime, so
/// every call blocks until its listing is complete.
pub struct GitLabClient {
    base_url: String,
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

/// One decoded response plus its pagination cursor.
struct Page {
    body: Value,
    next_page: Option<String>,
}

impl GitLabClient {
    pub fn new(base_url: &str, private_token: &str, verify_tls: bool) -> Result<Self> {
        let mut token = HeaderValue::from_str(private_token).map_err(|_| {
            AuditExportError::Transport {
                reason: "private token contains characters not allowed in a header".into(),
            }
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("gitlab-audit-export/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| AuditExportError::Transport {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AuditExportError::Transport {
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            runtime,
        })
    }

    /// GET `path`, following `X-Next-Page` until it runs out.
    ///
    /// Array pages are concatenated in order. A JSON object is returned
    /// as is, without looking for further pages.
    fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        query.push(("per_page".into(), PER_PAGE.into()));

        let mut items = Vec::new();
        loop {
            let page = self.fetch_page(&url, &query)?;
            match page.body {
                Value::Array(batch) => items.extend(batch),
                other => return Ok(other),
            }

            let Some(next) = page.next_page else { break };
            query.retain(|(k, _)| k != "page");
            query.push(("page".into(), next));
            std::thread::sleep(PAGE_DELAY);
        }

        Ok(Value::Array(items))
    }

    fn fetch_page(&self, url: &str, query: &[(String, String)]) -> Result<Page> {
        debug!(url, ?query, "GET");

        self.runtime.block_on(async {
            let resp = self
                .http
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| AuditExportError::Transport {
                    reason: format!("{url}: {e}"),
                })?;

            let status = resp.status();
            let next_page = resp
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(AuditExportError::Remote {
                    status: status.as_u16(),
                    body,
                });
            }

            let body: Value = resp.json().await.map_err(|e| AuditExportError::Transport {
                reason: format!("invalid JSON from {url}: {e}"),
            })?;
            debug!(url, next_page = next_page.as_deref(), "page received");

            Ok(Page { body, next_page })
        })
    }

    fn list<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<T>> {
        let value = self.get_json(path, params)?;
        serde_json::from_value(value).map_err(|e| AuditExportError::Transport {
            reason: format!("unexpected response shape from {path}: {e}"),
        })
    }
}

fn project_path(project: &str) -> String {
    format!("/api/v4/projects/{}", urlencoding::encode(project))
}

impl RemoteSource for GitLabClient {
    fn resolve_project(&self, path_or_id: &str) -> Result<Project> {
        let path = project_path(path_or_id);
        let value = self.get_json(&path, &[])?;
        serde_json::from_value(value).map_err(|e| AuditExportError::Transport {
            reason: format!("unexpected project payload: {e}"),
        })
    }

    fn list_commits(&self, project: &str) -> Result<Vec<Commit>> {
        self.list(&format!("{}/repository/commits", project_path(project)), &[])
    }

    fn list_branches(&self, project: &str) -> Result<Vec<Branch>> {
        self.list(&format!("{}/repository/branches", project_path(project)), &[])
    }

    fn list_merge_requests(&self, project: &str) -> Result<Vec<MergeRequest>> {
        self.list(
            &format!("{}/merge_requests", project_path(project)),
            &[("state", "all")],
        )
    }
}
