use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info, warn};

use crate::core::errors::{AuditExportError, Result};
use crate::core::models::audit_event::{AuditEvent, EventSource};
use crate::core::models::filter_window::{FilterWindow, WindowRequest};
use crate::core::services::date_normalizer::DateNormalizer;
use crate::core::traits::local_source::LocalSource;
use crate::core::traits::remote_source::RemoteSource;

/// What to collect in one run.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// GitLab project path (`group/project`) or numeric id.
    pub project: Option<String>,
    /// Working copy to read `git log` and `git reflog` from.
    pub repo_path: Option<PathBuf>,
    pub window: WindowRequest,
}

/// Collected events plus the non-fatal problems met on the way.
#[derive(Debug, Default)]
pub struct CollectReport {
    pub events: Vec<AuditEvent>,
    pub warnings: Vec<String>,
}

impl CollectReport {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

/// Gathers events from the remote and local sources into one list.
///
/// Every sub-step (project lookup, each remote listing, each local
/// command) fails on its own: its error becomes a warning and the
/// remaining sub-steps still run.
pub struct Collector {
    dates: DateNormalizer,
    remote: Option<Box<dyn RemoteSource>>,
    local: Box<dyn LocalSource>,
}

impl Collector {
    pub fn new(
        dates: DateNormalizer,
        remote: Option<Box<dyn RemoteSource>>,
        local: Box<dyn LocalSource>,
    ) -> Self {
        Self {
            dates,
            remote,
            local,
        }
    }

    pub fn collect(&self, options: &CollectOptions) -> CollectReport {
        self.collect_at(options, Utc::now().fixed_offset())
    }

    /// Same as [`collect`](Self::collect) with an explicit "now" for
    /// month-based windows.
    pub fn collect_at(&self, options: &CollectOptions, now: DateTime<FixedOffset>) -> CollectReport {
        let mut report = CollectReport::default();
        let window = self.filter_window(&options.window, now, &mut report);

        if let Some(remote) = &self.remote {
            match &options.project {
                Some(project) => self.collect_remote(remote.as_ref(), project, &window, &mut report),
                None => report.warn("No project given; skipping GitLab collection".into()),
            }
        }

        if let Some(repo) = &options.repo_path {
            match self.local.commit_log(repo) {
                Ok(events) => self.keep_in_window(events, &window, &mut report, "local commits"),
                Err(e) => report.warn(format!("Local git log error: {e}")),
            }
            match self.local.reflog(repo) {
                Ok(events) => self.keep_in_window(events, &window, &mut report, "reflog entries"),
                Err(e) => report.warn(format!("Local reflog error: {e}")),
            }
        }

        report
    }

    /// The explicit range replaces `months_back`; the two never combine.
    fn filter_window(
        &self,
        request: &WindowRequest,
        now: DateTime<FixedOffset>,
        report: &mut CollectReport,
    ) -> FilterWindow {
        if let Some((from, to)) = &request.date_range {
            let mut bound = |text: &str| match self.parse_bound(text) {
                Ok(instant) => Some(instant),
                Err(e) => {
                    report.warn(format!("{e}\n  This bound is ignored."));
                    None
                }
            };
            let start = bound(from);
            let end = bound(to);
            return FilterWindow { start, end };
        }

        match request.months_back {
            Some(months) => FilterWindow::months_back(now, months),
            None => FilterWindow::unbounded(),
        }
    }

    fn parse_bound(&self, text: &str) -> Result<DateTime<FixedOffset>> {
        self.dates
            .parse_flexible(text)
            .ok_or_else(|| AuditExportError::DateParse {
                input: text.to_string(),
            })
    }

    fn collect_remote(
        &self,
        remote: &dyn RemoteSource,
        project: &str,
        window: &FilterWindow,
        report: &mut CollectReport,
    ) {
        let project_id = match remote.resolve_project(project) {
            Ok(p) => {
                debug!(id = p.id, path = p.path_with_namespace.as_deref(), "project resolved");
                p.id.to_string()
            }
            Err(e) => {
                report.warn(format!("Failed to resolve project path, using given id: {e}"));
                project.to_string()
            }
        };

        match remote.list_commits(&project_id) {
            Ok(commits) => {
                let events = commits.iter().map(|c| {
                    let raw = c.created_at.as_deref().or(c.committed_date.as_deref());
                    AuditEvent::new(EventSource::RemoteCommit, "commit")
                        .with_user(c.author_name.as_deref(), c.author_email.as_deref())
                        .with_timestamp(self.dates.normalize(raw.unwrap_or_default()))
                        .with_commit(c.id.as_deref())
                        .with_message(c.message.as_deref())
                        .with_url(c.web_url.as_deref())
                });
                self.keep_in_window(events, window, report, "GitLab commits");
            }
            Err(e) => report.warn(format!("GitLab commits fetch error: {e}")),
        }

        // A branch is dated by its tip commit; GitLab records no creation event.
        match remote.list_branches(&project_id) {
            Ok(branches) => {
                let events = branches.iter().map(|b| {
                    let tip = b.commit.clone().unwrap_or_default();
                    AuditEvent::new(EventSource::RemoteBranch, "branch")
                        .with_timestamp(
                            self.dates.normalize(tip.committed_date.as_deref().unwrap_or_default()),
                        )
                        .with_ref(b.name.clone().unwrap_or_default())
                        .with_commit(tip.id.as_deref())
                        .with_message(tip.message.as_deref())
                        .with_url(b.web_url.as_deref())
                });
                self.keep_in_window(events, window, report, "GitLab branches");
            }
            Err(e) => report.warn(format!("GitLab branches fetch error: {e}")),
        }

        match remote.list_merge_requests(&project_id) {
            Ok(mrs) => {
                let events = mrs.iter().map(|m| {
                    let author = m.author.as_ref().and_then(|a| a.name.as_deref());
                    AuditEvent::new(
                        EventSource::RemoteMergeRequest,
                        format!("merge_request_{}", m.state.as_deref().unwrap_or_default()),
                    )
                    .with_user(author, None)
                    .with_timestamp(self.dates.normalize(m.updated_at.as_deref().unwrap_or_default()))
                    .with_ref(format!(
                        "{}->{}",
                        m.source_branch.as_deref().unwrap_or_default(),
                        m.target_branch.as_deref().unwrap_or_default()
                    ))
                    .with_commit(m.sha.as_deref())
                    .with_message(m.title.as_deref())
                    .with_url(m.web_url.as_deref())
                });
                self.keep_in_window(events, window, report, "GitLab merge requests");
            }
            Err(e) => report.warn(format!("GitLab merge requests fetch error: {e}")),
        }
    }

    fn keep_in_window(
        &self,
        events: impl IntoIterator<Item = AuditEvent>,
        window: &FilterWindow,
        report: &mut CollectReport,
        label: &str,
    ) {
        let before = report.events.len();
        report.events.extend(
            events
                .into_iter()
                .filter(|e| self.dates.in_range(&e.timestamp, window)),
        );
        info!(kept = report.events.len() - before, "{label} collected");
    }
}
