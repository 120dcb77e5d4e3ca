//! promptpick - prompt template picker
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use promptpick::cli::{Cli, Command, OutputFormat, get_log_path};
use promptpick::config::Config;
use promptpick::picker::NO_SELECTION;
use promptpick::registry::key_width;
use promptpick::{ConsoleNotifier, Notification, PickSession, Picker, SystemClipboard};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    if let Some(dir) = cli.dir {
        config.prompts_dir = dir;
    }
    info!(variant = %config.variant, prompts_dir = %config.prompts_dir, "promptpick starting");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::List { format }) => cmd_list(&config, format).await,
        Some(Command::Show { key }) => cmd_show(&config, key.as_deref()).await,
        Some(Command::Copy { key, stdout }) => cmd_copy(&config, key.as_deref(), stdout).await,
        Some(Command::Pick) | None => cmd_pick(&config).await,
    }
}

/// Mount a picker and make `key` active when given
async fn mount_with(config: &Config, key: Option<&str>) -> Result<Picker> {
    let mut picker = Picker::from_config(config, Box::new(ConsoleNotifier)).await?;
    if let Some(key) = key {
        if !picker.select(key) {
            let known: Vec<String> = picker.entries().into_iter().map(|e| e.key).collect();
            return Err(eyre!("Unknown template: {} (available: {})", key, known.join(", ")));
        }
    }
    Ok(picker)
}

async fn cmd_list(config: &Config, format: OutputFormat) -> Result<()> {
    debug!(%format, "cmd_list: called");
    let picker = mount_with(config, None).await?;
    let entries = picker.entries();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No templates found");
            }
            let width = key_width(&entries);
            for entry in entries {
                let marker = if Some(entry.key.as_str()) == picker.active_key() { "*" } else { " " };
                println!("{} {:width$}  {}", marker, entry.key, entry.title, width = width);
            }
        }
    }
    Ok(())
}

async fn cmd_show(config: &Config, key: Option<&str>) -> Result<()> {
    debug!(?key, "cmd_show: called");
    let picker = mount_with(config, key).await?;
    let Some(content) = picker.active_content() else {
        warn_no_selection(&picker, "nothing to show");
        return Ok(());
    };
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

async fn cmd_copy(config: &Config, key: Option<&str>, stdout: bool) -> Result<()> {
    debug!(?key, stdout, "cmd_copy: called");
    let picker = mount_with(config, key).await?;
    if stdout {
        match picker.active_content() {
            Some(content) => print!("{}", content),
            None => warn_no_selection(&picker, "nothing to copy"),
        }
        return Ok(());
    }

    picker.copy(&mut SystemClipboard::new())
}

/// Nothing selected is reported, not fatal
fn warn_no_selection(picker: &Picker, message: &str) {
    picker.registry().notify(Notification::warning(NO_SELECTION, message));
}

async fn cmd_pick(config: &Config) -> Result<()> {
    debug!("cmd_pick: called");
    let picker = mount_with(config, None).await?;
    let mut session = PickSession::new(picker, SystemClipboard::new());
    session.run().await
}
