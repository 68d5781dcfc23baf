use std::path::{Path, PathBuf};

use crate::core::errors::{AuditExportError, Result};
use crate::core::models::audit_event::AuditEvent;

/// What happened when a report was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No events, so no file was created.
    Empty,
    Written { rows: usize, path: PathBuf },
}

/// Port for report serializers.
pub trait Exporter {
    /// Render the complete report document.
    fn render(&self, events: &[AuditEvent]) -> Result<String>;

    /// Format name as accepted by `--output-format`.
    fn name(&self) -> &str;

    /// Default file extension, without the dot.
    fn extension(&self) -> &str;

    /// Render `events` and write them to `path`.
    ///
    /// An empty event list leaves the filesystem untouched.
    fn write_to(&self, events: &[AuditEvent], path: &Path) -> Result<ExportOutcome> {
        if events.is_empty() {
            return Ok(ExportOutcome::Empty);
        }

        let document = self.render(events)?;
        std::fs::write(path, document).map_err(|e| AuditExportError::Export {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        Ok(ExportOutcome::Written {
            rows: events.len(),
            path: path.to_path_buf(),
        })
    }
}
