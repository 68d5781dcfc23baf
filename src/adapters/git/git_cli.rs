use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::core::errors::{AuditExportError, Result};
use crate::core::traits::vcs::VcsRunner;

/// Runs the system `git` binary.
pub struct GitCli {
    /// Path to the git binary (defaults to "git").
    git_path: PathBuf,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            git_path: PathBuf::from("git"),
        }
    }

    /// Use a custom git binary.
    pub fn with_path(git_path: PathBuf) -> Self {
        Self { git_path }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsRunner for GitCli {
    fn run(&self, repo: &Path, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        debug!(repo = %repo.display(), %command, "running");

        let output = Command::new(&self.git_path)
            .args(args)
            .current_dir(repo)
            .output()
            .map_err(|e| AuditExportError::Process {
                command: command.clone(),
                detail: format!("could not start {}: {e}", self.git_path.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AuditExportError::Process {
                command,
                detail: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
