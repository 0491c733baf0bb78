//! cli
//!
//! Command-line interface layer for locbook.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and documents, hold document locks
//! - Delegate to command handlers, which call the engine
//!
//! # Architecture
//!
//! The CLI layer owns all I/O. The engine mutates an in-memory copy of the
//! target; a handler saves it only after the engine returns successfully,
//! so a failed merge or import never changes the file on disk.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Execution context shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory for relative paths and project config.
    pub cwd: PathBuf,
    pub verbosity: Verbosity,
    /// Print result records as JSON.
    pub json: bool,
}

impl Context {
    /// Resolve a command-line path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Load global and project configuration.
    pub fn config(&self) -> Result<Config> {
        let loaded = Config::load(Some(&self.cwd)).context("Failed to load config")?;
        Ok(loaded.config)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let cwd = match cli.cwd.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let ctx = Context {
        cwd,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}
