use std::path::PathBuf;

/// All domain errors for gitlab-audit-export.
///
/// Remote, transport, process and date errors are recovered inside the
/// collector and reported as warnings. Configuration and export errors
/// reach `main` and end the run.
#[derive(Debug, thiserror::Error)]
pub enum AuditExportError {
    #[error("GitLab API error {status}: {body}")]
    Remote { status: u16, body: String },

    #[error(
        "GitLab request failed: {reason}\n\n  \
         Check that --gitlab-url is reachable from this machine.\n  \
         For self-signed certificates, retry with --insecure."
    )]
    Transport { reason: String },

    #[error("'{command}' failed: {detail}")]
    Process { command: String, detail: String },

    #[error(
        "Could not interpret date '{input}'\n\n  \
         Accepted forms include 2025-07-24, 24/07/2025 and 2025-07-24T10:00:00+02:00."
    )]
    DateParse { input: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Could not render {format} report: {detail}")]
    Render { format: String, detail: String },

    #[error(
        "Could not write report to {path}: {detail}\n\n  \
         Check that the directory exists and is writable, or pass --output-file."
    )]
    Export { path: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuditExportError>;
