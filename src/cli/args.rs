//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Print result records as JSON

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Locbook - merge and import localization documents
#[derive(Parser, Debug)]
#[command(name = "locbook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if locbook was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty locbook document
    #[command(name = "new")]
    New {
        /// Path of the document to create
        path: PathBuf,
    },

    /// Merge a source document into a target document
    #[command(
        name = "merge",
        long_about = "Merge a source document into a target document.\n\n\
            Pages match by page ID and fields by key or alias, ignoring case. \
            Missing pages, fields and variants are added. Existing values are \
            kept unless --overwrite is given. Locks on the target are honored.\n\n\
            In additive mode every field in the target then gets a variant for \
            each language the source uses, empty if no value is known.",
        after_help = "\
EXAMPLES:
    # Bring in new strings without touching existing translations
    locbook merge game.locbook vendor.locbook

    # Let the source win, writing to a new file
    locbook merge game.locbook vendor.locbook --overwrite -o merged.locbook"
    )]
    Merge {
        /// Document to merge into
        target: PathBuf,

        /// Document to merge from
        source: PathBuf,

        /// Replace non-empty target values with source values
        #[arg(long, conflicts_with = "additive")]
        overwrite: bool,

        /// Never replace non-empty target values
        #[arg(long)]
        additive: bool,

        /// Write the result here instead of back to the target
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Import selected parts of a source document into a target document
    #[command(
        name = "import",
        long_about = "Import selected parts of a source document into a target document.\n\n\
            Each attribute class is imported only when enabled, and only while the \
            target does not lock it. Variants are imported for the chosen languages \
            only. Lock flags and locked languages on the source are added to the \
            target.\n\n\
            Flags not given fall back to the [import] section of the config. With no \
            --lang and no configured languages, every language in the source is \
            imported.",
        after_help = "\
EXAMPLES:
    # Pull French and German translations back from a contractor
    locbook import game.locbook contractor.locbook --lang fr --lang de

    # Update existing pages only, replacing what is there
    locbook import game.locbook update.locbook --no-pages --overwrite"
    )]
    Import {
        /// Document to import into
        target: PathBuf,

        /// Document to import from
        source: PathBuf,

        /// Create pages that exist only in the source
        #[arg(long, conflicts_with = "no_pages")]
        pages: bool,

        /// Only update pages the target already has
        #[arg(long)]
        no_pages: bool,

        /// Import page descriptions
        #[arg(long)]
        about: bool,

        /// Import field keys
        #[arg(long)]
        keys: bool,

        /// Import source-language text
        #[arg(long)]
        original_values: bool,

        /// Skip translated variants
        #[arg(long)]
        no_variants: bool,

        /// Language to import (repeatable)
        #[arg(long = "lang", value_name = "CODE")]
        languages: Vec<String>,

        /// Replace non-empty target values
        #[arg(long)]
        overwrite: bool,

        /// Write the result here instead of back to the target
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List the languages used in a document
    #[command(name = "languages")]
    Languages {
        /// Document to inspect
        path: PathBuf,
    },

    /// Export per-language key/value JSON files
    #[command(
        name = "export",
        long_about = "Export per-language key/value JSON files.\n\n\
            Writes one file per language, mapping each field key to its translated \
            value. Empty values are left out. Files are named <prefix>_<lang>.json, \
            or <page>_<lang>.json with --page."
    )]
    Export {
        /// Document to export
        path: PathBuf,

        /// Directory to write files into
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Export a single page
        #[arg(long, value_name = "PAGE_ID")]
        page: Option<String>,
    },

    /// Write a single-language copy of a document for a translator
    #[command(
        name = "filter",
        long_about = "Write a single-language copy of a document for a translator.\n\n\
            Every field gets one variant in the chosen language. Page IDs, \
            descriptions, keys and source text are locked in the copy, and so is \
            every other language, so importing the returned file only brings back \
            that language's translations."
    )]
    Filter {
        /// Document to filter
        path: PathBuf,

        /// Language to keep
        #[arg(long = "lang", value_name = "CODE")]
        language: String,

        /// Leave field keys blank
        #[arg(long)]
        no_keys: bool,

        /// Leave source-language text blank
        #[arg(long)]
        no_original_values: bool,

        /// Leave out variants
        #[arg(long)]
        no_variants: bool,

        /// Where to write the filtered document
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
    },

    /// Get, set, or list configuration values
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for locbook commands."
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
        /// Write to the project config in the working directory
        #[arg(long)]
        project: bool,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Collapse a `--flag` / `--no-flag` pair into an override.
pub fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
