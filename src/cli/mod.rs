pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::app_config::OutputFormat;

/// Export GitLab or local repo audit trail actions to CSV or interactive HTML.
#[derive(Parser, Debug)]
#[command(name = "gitlab-audit-export", version, about, long_about = None)]
pub struct Cli {
    /// Base GitLab URL (e.g. https://gitlab.example.com)
    #[arg(long, env = "GITLAB_URL")]
    pub gitlab_url: Option<String>,

    /// GitLab private token (needs read_api scope)
    #[arg(long, env = "GITLAB_PRIVATE_TOKEN", hide_env_values = true)]
    pub private_token: Option<String>,

    /// GitLab project path (group/project) or numeric id
    #[arg(long)]
    pub project: String,

    /// Local repository path (e.g. /path/to/repo)
    #[arg(long)]
    pub repo_path: PathBuf,

    /// Report format [default: html]
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Report file [default: audit_output.<format>]
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Only include data newer than N months (30 days each)
    #[arg(long, conflicts_with = "date_range")]
    pub months_back: Option<u32>,

    /// Filter by explicit date range (e.g. 2025-07-24 2025-10-02)
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    pub date_range: Option<Vec<String>>,

    /// Disable TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Path to a config file
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: only show warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}
