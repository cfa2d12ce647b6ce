// CLI module for argument parsing and configuration

use crate::config::{default_export_dir, default_private_root};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// docvault - a private document shelf for the terminal
///
/// Imports copies of your files into a private folder, lists them and
/// shows each one in the most suitable viewer.
#[derive(Parser, Debug, Clone)]
#[command(name = "docvault")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Private root holding the managed document folder
    ///
    /// Defaults to the platform data directory.
    #[arg(long = "root", global = true)]
    pub root: Option<PathBuf>,

    /// Where exported copies are saved
    ///
    /// Defaults to the Downloads folder, or the home directory.
    #[arg(long = "export-dir", global = true)]
    pub export_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Show the welcome screen even if it was already seen
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub welcome: bool,

    /// Delete without asking for confirmation
    #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Browse documents in the terminal UI (default)
    Browse,
    /// Print the catalogue
    List,
    /// Copy a file into the vault
    Import {
        path: PathBuf,
        /// Name to store the copy under
        #[arg(long = "name")]
        name: Option<String>,
    },
    /// Delete a document
    Delete { name: String },
    /// Save a copy of a document outside the vault
    Export {
        name: String,
        /// Destination directory, overriding --export-dir
        #[arg(long = "to")]
        to: Option<PathBuf>,
    },
    /// Hand a document to the default application
    Share { name: String },
    /// Print how a document would be presented
    Show { name: String },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(root) = &self.root {
            if root.exists() && !root.is_dir() {
                return Err(format!("Root is not a directory: {}", root.display()));
            }
        }

        if let Some(dir) = &self.export_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(format!(
                    "Export path is not a directory: {}",
                    dir.display()
                ));
            }
        }

        match &self.command {
            Some(Command::Import { path, name }) => {
                if path.as_os_str().is_empty() {
                    return Err("Import path is empty".to_string());
                }
                if let Some(name) = name {
                    if name.trim().is_empty() {
                        return Err("--name cannot be blank".to_string());
                    }
                }
            }
            Some(Command::Delete { name })
            | Some(Command::Export { name, .. })
            | Some(Command::Share { name })
            | Some(Command::Show { name }) => {
                if name.trim().is_empty() {
                    return Err("Document name cannot be blank".to_string());
                }
            }
            Some(Command::Browse) | Some(Command::List) | None => {}
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub private_root: PathBuf,
    pub export_dir: PathBuf,
    pub verbosity: u8,
    pub force_welcome: bool,
    pub skip_confirm: bool,
    pub command: Command,
}

impl AppConfig {
    /// True for the interactive terminal UI
    pub fn is_interactive(&self) -> bool {
        self.command == Command::Browse
    }

    /// Log level filter for the CLI commands
    pub fn log_level(&self) -> tracing::Level {
        match self.verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            private_root: args.root.unwrap_or_else(default_private_root),
            export_dir: args.export_dir.unwrap_or_else(default_export_dir),
            verbosity: args.verbose,
            force_welcome: args.welcome,
            skip_confirm: args.yes,
            command: args.command.unwrap_or(Command::Browse),
        }
    }
}
