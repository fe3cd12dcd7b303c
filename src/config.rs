//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.sehat.toml` files.

use crate::cli::{Args, OutputFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".sehat.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Member store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the member collection lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per key.
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,

    /// Key the member array is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            key: default_key(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_key() -> String {
    crate::store::DEFAULT_MEMBERS_KEY.to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default dashboard format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Default dashboard output file; stdout when unset.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Number of recent members on the dashboard.
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    /// Months covered by the registration trend.
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    /// Directory for JSON exports.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            output: None,
            recent_count: default_recent_count(),
            trend_months: default_trend_months(),
            export_dir: default_export_dir(),
        }
    }
}

fn default_recent_count() -> usize {
    3
}

fn default_trend_months() -> usize {
    6
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when they were given.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref dir) = args.store_dir {
            self.store.dir = dir.clone();
        }
        if let Some(ref key) = args.key {
            self.store.key = key.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.dir, PathBuf::from("data"));
        assert_eq!(config.store.key, "adminMembersData");
        assert_eq!(config.report.recent_count, 3);
        assert_eq!(config.report.trend_months, 6);
        assert_eq!(config.report.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[store]
dir = "/var/lib/sehat"

[report]
format = "json"
recent_count = 5
trend_months = 12
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.store.dir, PathBuf::from("/var/lib/sehat"));
        assert_eq!(config.store.key, "adminMembersData");
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.recent_count, 5);
        assert_eq!(config.report.trend_months, 12);
        assert_eq!(config.report.output, None);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let args = Args {
            store_dir: Some(PathBuf::from("other")),
            key: None,
            config: None,
            verbose: false,
            quiet: false,
            command: Command::InitConfig,
        };

        config.merge_with_args(&args);
        assert_eq!(config.store.dir, PathBuf::from("other"));
        assert_eq!(config.store.key, "adminMembersData");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.store.key, "adminMembersData");
    }
}
