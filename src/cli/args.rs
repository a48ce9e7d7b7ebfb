//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Find Django projects and list their routes and admin models
//! - `init`: Initialize routescout configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// Scan results as a JSON array
    Json,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Directories to scan (default: `paths` from the config file)
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// How deep to look for manage.py (overrides config file)
    #[arg(long)]
    pub project_depth: Option<usize>,

    /// How deep below the project root to look for urls.py and admin modules
    /// (overrides config file)
    #[arg(long)]
    pub app_depth: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find Django projects and list their routes and registered admin models
    Scan(ScanCommand),
    /// Initialize a new .routescoutrc.json configuration file
    Init,
}
