use std::path::PathBuf;

use tracing::debug;

use crate::adapters::dates;
use crate::adapters::exporters::csv_exporter::CsvExporter;
use crate::adapters::exporters::html_exporter::HtmlExporter;
use crate::adapters::git::git_cli::GitCli;
use crate::adapters::git::local_history::GitHistory;
use crate::adapters::gitlab::gitlab_client::GitLabClient;
use crate::cli::{Cli, output};
use crate::config::app_config::{AppConfig, OutputFormat};
use crate::core::errors::Result;
use crate::core::models::filter_window::WindowRequest;
use crate::core::services::collector::{CollectOptions, Collector};
use crate::core::traits::exporter::{ExportOutcome, Exporter};
use crate::core::traits::remote_source::RemoteSource;

/// Command-line values merged over the config file.
#[derive(Debug)]
struct Settings {
    gitlab_url: Option<String>,
    private_token: Option<String>,
    insecure: bool,
    format: OutputFormat,
    output_file: Option<PathBuf>,
}

impl Settings {
    fn resolve(cli: &Cli, config: &AppConfig) -> Self {
        Self {
            gitlab_url: cli.gitlab_url.clone().or_else(|| config.gitlab.url.clone()),
            private_token: cli
                .private_token
                .clone()
                .or_else(|| config.gitlab.private_token.clone()),
            insecure: cli.insecure || config.gitlab.insecure,
            format: cli.output_format.or(config.export.format).unwrap_or_default(),
            output_file: cli
                .output_file
                .clone()
                .or_else(|| config.export.output_file.as_ref().map(PathBuf::from)),
        }
    }
}

/// Collect events from GitLab and the local repository, then write the
/// report.
///
/// Collection problems are printed as warnings and never fail the run.
/// An empty result ends the run successfully without writing a file.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = AppConfig::locate(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, &config);

    let exporter: Box<dyn Exporter> = match settings.format {
        OutputFormat::Csv => Box::new(CsvExporter),
        OutputFormat::Html => Box::new(HtmlExporter),
    };
    let output_file = settings
        .output_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("audit_output.{}", exporter.extension())));

    let normalizer = dates::normalizer_for(&config.dates.parser)?;
    let local = GitHistory::new(Box::new(GitCli::new()));
    let collector = Collector::new(normalizer, build_remote(&settings), Box::new(local));

    let options = CollectOptions {
        project: Some(cli.project.clone()),
        repo_path: Some(cli.repo_path.clone()),
        window: WindowRequest {
            months_back: cli.months_back,
            date_range: cli
                .date_range
                .as_ref()
                .and_then(|r| Some((r.first()?.clone(), r.get(1)?.clone()))),
        },
    };

    output::header("GitLab Audit Export");
    let sp = output::spinner("Collecting audit events...");
    let report = collector.collect(&options);
    output::finish_spinner(sp, &format!("Collected {} events", report.events.len()));

    for warning in &report.warnings {
        output::warning(warning);
    }

    if report.events.is_empty() {
        output::warning("No matching data found.");
        return Ok(());
    }

    match exporter.write_to(&report.events, &output_file)? {
        ExportOutcome::Empty => output::warning("No data to write."),
        ExportOutcome::Written { rows, path } => output::success(&format!(
            "Wrote {rows} rows to {}: {}",
            exporter.name().to_uppercase(),
            path.display()
        )),
    }

    Ok(())
}

/// The GitLab client, when both URL and token are known.
fn build_remote(settings: &Settings) -> Option<Box<dyn RemoteSource>> {
    let (url, token) = match (&settings.gitlab_url, &settings.private_token) {
        (Some(url), Some(token)) => (url, token),
        (None, None) => {
            debug!("no GitLab credentials, collecting local data only");
            return None;
        }
        _ => {
            output::warning(
                "Both --gitlab-url and --private-token are needed for GitLab data; \
                 collecting local data only",
            );
            return None;
        }
    };

    match GitLabClient::new(url, token, !settings.insecure) {
        Ok(client) => Some(Box::new(client)),
        Err(e) => {
            output::warning(&format!("GitLab client unavailable: {e}"));
            None
        }
    }
}
