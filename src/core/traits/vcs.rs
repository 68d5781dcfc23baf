use std::path::Path;

use crate::core::errors::Result;

/// Port for read-only invocations of a version-control binary.
pub trait VcsRunner {
    /// Run the tool with `args` inside `repo` and return its stdout.
    fn run(&self, repo: &Path, args: &[&str]) -> Result<String>;
}
