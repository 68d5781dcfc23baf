use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::audit_event::AuditEvent;

/// Port for the history of a local working copy.
pub trait LocalSource {
    /// Commits reachable from any ref, as `local-commit` events.
    fn commit_log(&self, repo: &Path) -> Result<Vec<AuditEvent>>;

    /// Reference-log entries, as `local-reflog-entry` events.
    fn reflog(&self, repo: &Path) -> Result<Vec<AuditEvent>>;
}
