//! Interactive picker session
//!
//! A readline loop over a mounted [`Picker`]: choose a template, look at it,
//! edit the working copy in `$EDITOR`, and copy it to the clipboard.

use std::io::Write;
use std::process::Command;

use colored::Colorize;
use eyre::{Context, Result, eyre};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::clipboard::ClipboardSink;
use crate::picker::Picker;
use crate::registry::key_width;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Help,
    Quit,
    List,
    Select(String),
    Show,
    Edit,
    Reset,
    Copy,
    Reload,
    Unknown(String),
}

/// Parse a line; blank lines yield `None`
///
/// Anything not starting with `/` is taken as a template key.
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if !line.starts_with('/') {
        return Some(Input::Select(line.to_string()));
    }

    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next();
    let input = match (cmd, arg) {
        ("/help" | "/h", _) => Input::Help,
        ("/quit" | "/q" | "/exit", _) => Input::Quit,
        ("/list" | "/ls", _) => Input::List,
        ("/select" | "/s", Some(key)) => Input::Select(key.to_string()),
        ("/show" | "/cat", _) => Input::Show,
        ("/edit" | "/e", _) => Input::Edit,
        ("/reset", _) => Input::Reset,
        ("/copy" | "/c", _) => Input::Copy,
        ("/reload", _) => Input::Reload,
        _ => Input::Unknown(cmd.to_string()),
    };
    Some(input)
}

/// Interactive session
pub struct PickSession<C: ClipboardSink> {
    picker: Picker,
    clipboard: C,
}

impl<C: ClipboardSink> PickSession<C> {
    pub fn new(picker: Picker, clipboard: C) -> Self {
        Self { picker, clipboard }
    }

    /// Run the main loop until `/quit` or EOF
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();
        self.print_list();

        let mut rl = DefaultEditor::new().map_err(|e| eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let prompt = format!("{} ", format!("{}>", self.picker.active_key().unwrap_or("")).bright_green());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let Some(input) = parse_input(&line) else {
                        continue;
                    };
                    let _ = rl.add_history_entry(line.trim());
                    if !self.handle(input).await? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre!("Readline error: {}", err));
                }
            }
        }

        Ok(())
    }

    /// Apply one input; returns `false` to stop the loop
    pub async fn handle(&mut self, input: Input) -> Result<bool> {
        debug!(?input, "PickSession::handle: called");
        match input {
            Input::Help => self.print_help(),
            Input::Quit => return Ok(false),
            Input::List => self.print_list(),
            Input::Select(key) => {
                if self.picker.select(&key) {
                    println!("{} {}", "Selected".dimmed(), key.cyan());
                } else {
                    println!("{} Unknown template: {}", "?".yellow(), key);
                }
            }
            Input::Show => match self.picker.active_content() {
                Some(content) => println!("{}", content),
                None => println!("{}", "No template selected.".dimmed()),
            },
            Input::Edit => self.edit_active()?,
            Input::Reset => {
                if self.picker.reset() {
                    println!("{}", "Edits discarded.".dimmed());
                } else {
                    println!("{}", "No template selected.".dimmed());
                }
            }
            Input::Copy => {
                // Failure is already reported through the notifier
                let _ = self.picker.copy(&mut self.clipboard);
            }
            Input::Reload => {
                self.picker.reload().await?;
                self.print_list();
            }
            Input::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        Ok(true)
    }

    fn edit_active(&mut self) -> Result<()> {
        let Some(current) = self.picker.active_content() else {
            println!("{}", "No template selected.".dimmed());
            return Ok(());
        };
        let edited = edit_in_editor(current)?;
        self.picker.edit(edited);
        println!("{}", "Working copy updated (source file unchanged).".dimmed());
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "promptpick".bright_cyan().bold());
        if self.picker.registry().variant().scans_directory() {
            println!("Prompts directory: {}", self.picker.prompts_dir().display());
        }
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} List templates", "/list".yellow());
        println!("  {:16} Select a template (or type its key)", "/select <key>".yellow());
        println!("  {:16} Print the working copy", "/show".yellow());
        println!("  {:16} Edit the working copy in $EDITOR", "/edit".yellow());
        println!("  {:16} Discard edits", "/reset".yellow());
        println!("  {:16} Copy the working copy to the clipboard", "/copy".yellow());
        println!("  {:16} Re-scan the prompts directory", "/reload".yellow());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Exit", "/quit".yellow());
        println!();
    }

    fn print_list(&self) {
        let entries = self.picker.entries();
        let active = self.picker.active_key();
        let width = key_width(&entries);
        for entry in entries {
            let marker = if Some(entry.key.as_str()) == active { "*".green() } else { " ".normal() };
            let title = if entry.builtin { entry.title.dimmed() } else { entry.title.normal() };
            let key = format!("{:width$}", entry.key, width = width);
            println!("{} {}  {}", marker, key.cyan(), title);
        }
        if self.picker.selection().is_edited() {
            println!("{}", "(working copy has unsaved edits)".dimmed());
        }
    }
}

/// Editor command from `$VISUAL`, then `$EDITOR`, then `vi`
pub fn editor_command() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Round-trip `content` through the user's editor via a temporary file
pub fn edit_in_editor(content: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("pp-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create temporary file")?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    let editor = editor_command();
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or_else(|| eyre!("Empty editor command"))?;
    debug!(%editor, path = ?file.path(), "edit_in_editor: launching editor");

    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .context(format!("Failed to launch editor '{}'", editor))?;
    if !status.success() {
        return Err(eyre!("Editor '{}' exited with {}", editor, status));
    }

    std::fs::read_to_string(file.path()).context("Failed to read edited template")
}
