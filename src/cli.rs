//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::MentalStatus;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// sehat-admin - member health statistics for the Hidup Sehat admin
///
/// Reads the member collection from the store, computes dashboard
/// statistics and renders them as Markdown or JSON.
///
/// Examples:
///   sehat-admin dashboard
///   sehat-admin dashboard --format json --output dashboard.json
///   sehat-admin members --search budi --status attention
///   sehat-admin show siti@email.com
///   sehat-admin export --dir backups
///   sehat-admin seed
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory holding the member store
    #[arg(long, global = true, value_name = "DIR", env = "SEHAT_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// Store key the member list is saved under
    #[arg(long, global = true, value_name = "KEY")]
    pub key: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .sehat.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render the admin dashboard
    Dashboard {
        /// Output format
        #[arg(long, value_name = "FORMAT")]
        format: Option<OutputFormat>,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Use the built-in sample members when the store is empty
        #[arg(long)]
        sample: bool,

        /// Number of recent members to list
        #[arg(long, value_name = "COUNT")]
        recent: Option<usize>,
    },

    /// List members, optionally filtered
    Members {
        /// Case-insensitive search over name and email
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,

        /// Only members with this mental status
        #[arg(long, value_name = "STATUS")]
        status: Option<StatusFilter>,
    },

    /// Show one member by email or id
    Show {
        #[arg(value_name = "EMAIL|ID")]
        member: String,
    },

    /// Delete one member by email or id
    Delete {
        #[arg(value_name = "EMAIL|ID")]
        member: String,
    },

    /// Export all members to members-data-<date>.json
    Export {
        /// Target directory
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Write the sample members into the store
    Seed {
        /// Overwrite existing member data
        #[arg(long)]
        force: bool,
    },

    /// Generate a default .sehat.toml configuration file
    InitConfig,
}

/// Output format for the dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Mental status values accepted by `members --status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusFilter {
    Good,
    Attention,
    Help,
}

impl From<StatusFilter> for MentalStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Good => MentalStatus::Good,
            StatusFilter::Attention => MentalStatus::NeedsAttention,
            StatusFilter::Help => MentalStatus::NeedsHelp,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref key) = self.key {
            if key.trim().is_empty() {
                return Err("Store key must not be empty".to_string());
            }
        }

        match &self.command {
            Command::Dashboard {
                recent: Some(0), ..
            } => Err("--recent must be at least 1".to_string()),
            Command::Show { member } | Command::Delete { member } if member.trim().is_empty() => {
                Err("Member email or id must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            store_dir: None,
            key: None,
            config: None,
            verbose: false,
            quiet: false,
            command,
        }
    }

    #[test]
    fn test_parse_dashboard() {
        let args = Args::try_parse_from([
            "sehat-admin",
            "dashboard",
            "--format",
            "json",
            "--store-dir",
            "/tmp/store",
        ])
        .unwrap();

        assert_eq!(args.store_dir, Some(PathBuf::from("/tmp/store")));
        assert_eq!(
            args.command,
            Command::Dashboard {
                format: Some(OutputFormat::Json),
                output: None,
                sample: false,
                recent: None,
            }
        );
    }

    #[test]
    fn test_parse_members_filter() {
        let args =
            Args::try_parse_from(["sehat-admin", "members", "-s", "budi", "--status", "help"])
                .unwrap();

        match args.command {
            Command::Members { search, status } => {
                assert_eq!(search.as_deref(), Some("budi"));
                assert_eq!(status.map(MentalStatus::from), Some(MentalStatus::NeedsHelp));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::InitConfig);
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_empty_member() {
        let args = make_args(Command::Show {
            member: "  ".to_string(),
        });
        assert!(args.validate().is_err());

        let args = make_args(Command::Delete {
            member: "3".to_string(),
        });
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_recent() {
        let args = make_args(Command::Dashboard {
            format: None,
            output: None,
            sample: false,
            recent: Some(0),
        });
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::InitConfig);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
