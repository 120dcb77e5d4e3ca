//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::registry::Variant;

/// promptpick - pick, view, edit and copy prompt templates
#[derive(Parser)]
#[command(
    name = "pp",
    about = "Pick, view, edit and copy reusable prompt templates",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Template sources to offer (learning, library)
    #[arg(long, global = true, value_name = "VARIANT")]
    pub variant: Option<Variant>,

    /// Prompts directory, overrides the config file
    #[arg(short = 'd', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available templates
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a template
    Show {
        /// Template key (defaults to the default selection)
        key: Option<String>,
    },

    /// Copy a template to the clipboard
    Copy {
        /// Template key (defaults to the default selection)
        key: Option<String>,

        /// Print to stdout instead of the clipboard
        #[arg(long)]
        stdout: bool,
    },

    /// Interactively pick, edit and copy templates
    Pick,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptpick")
        .join("logs")
        .join("promptpick.log")
}

/// Output format for `list`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
