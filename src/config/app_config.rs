use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::errors::{AuditExportError, Result};

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "gitlab-audit-export";

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    #[default]
    Html,
}

/// Optional settings file, e.g. `~/.config/gitlab-audit-export/config.toml`.
///
/// Every key is optional; command-line flags and environment variables
/// take precedence over anything set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub gitlab: GitLabSection,
    pub export: ExportSection,
    pub dates: DatesSection,
}

impl AppConfig {
    /// Load `custom` if given (it must exist), otherwise the default
    /// location if present, otherwise built-in defaults.
    pub fn locate(custom: Option<&str>) -> Result<Self> {
        if let Some(path) = custom {
            return Self::load(Path::new(path));
        }
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuditExportError::InvalidConfig {
                detail: format!("config file not found: {}", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AuditExportError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// The `[gitlab]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitLabSection {
    pub url: Option<String>,
    pub private_token: Option<String>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

/// The `[export]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub format: Option<OutputFormat>,
    pub output_file: Option<String>,
}

/// The `[dates]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatesSection {
    /// `"flexible"` or `"iso"`.
    pub parser: String,
}

impl Default for DatesSection {
    fn default() -> Self {
        Self {
            parser: "flexible".into(),
        }
    }
}
