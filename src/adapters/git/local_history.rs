use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::audit_event::{AuditEvent, EventSource};
use crate::core::traits::local_source::LocalSource;
use crate::core::traits::vcs::VcsRunner;

/// `hash|author-name|author-email|author-date|subject`
const LOG_FORMAT: &str = "--pretty=format:%H|%an|%ae|%ad|%s";

/// Number of `|`-separated fields in a commit log line.
const LOG_FIELDS: usize = 5;

/// Local history read through the `git` command line.
pub struct GitHistory {
    vcs: Box<dyn VcsRunner>,
}

impl GitHistory {
    pub fn new(vcs: Box<dyn VcsRunner>) -> Self {
        Self { vcs }
    }
}

impl LocalSource for GitHistory {
    fn commit_log(&self, repo: &Path) -> Result<Vec<AuditEvent>> {
        parse_commit_log(self.vcs.as_ref(), repo)
    }

    fn reflog(&self, repo: &Path) -> Result<Vec<AuditEvent>> {
        parse_reflog(self.vcs.as_ref(), repo)
    }
}

/// Every commit reachable from any ref, one `local-commit` event each.
pub fn parse_commit_log(vcs: &dyn VcsRunner, repo: &Path) -> Result<Vec<AuditEvent>> {
    let out = vcs.run(repo, &["log", "--all", LOG_FORMAT, "--date=iso-strict"])?;
    Ok(commit_events(&out))
}

/// Reflog lines as `local-reflog-entry` events.
///
/// Only the leading hash and the rest of the line are kept. The date and
/// author git prints are not extracted, so those fields stay empty.
pub fn parse_reflog(vcs: &dyn VcsRunner, repo: &Path) -> Result<Vec<AuditEvent>> {
    let out = vcs.run(repo, &["reflog", "--date=iso"])?;
    Ok(reflog_events(&out))
}

/// Lines with fewer than five fields are skipped. The subject may itself
/// contain `|`.
fn commit_events(out: &str) -> Vec<AuditEvent> {
    out.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.splitn(LOG_FIELDS, '|').collect();
            let [sha, name, email, date, subject] = parts.as_slice() else {
                return None;
            };
            Some(
                AuditEvent::new(EventSource::LocalCommit, "commit")
                    .with_user(Some(*name), Some(*email))
                    .with_timestamp(*date)
                    .with_commit(Some(*sha))
                    .with_message(Some(*subject)),
            )
        })
        .collect()
}

fn reflog_events(out: &str) -> Vec<AuditEvent> {
    out.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (sha, message) = line.split_once(' ').unwrap_or((line, ""));
            AuditEvent::new(EventSource::LocalReflogEntry, "reflog")
                .with_commit(Some(sha))
                .with_message(Some(message))
        })
        .collect()
}
