//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves paths and applies config defaults to its flags
//! 2. Locks and loads the documents it needs
//! 3. Calls the engine, then saves on success
//! 4. Formats and displays output
//!
//! Handlers never edit a document field by field; all changes come from
//! the engine.

mod completion;
mod config_cmd;
mod export;
mod filter;
mod import;
mod languages;
mod merge;
mod new;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use export::export;
pub use filter::filter;
pub use import::{import, ImportOverrides};
pub use languages::languages;
pub use merge::merge;
pub use new::new;

use crate::cli::args::{flag_pair, Command, ConfigAction};
use crate::cli::Context;
use crate::engine::{EngineError, FilterOptions};
use crate::ui::output;
use anyhow::Result;
use std::path::Path;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::New { path } => new::new(ctx, &path),
        Command::Merge {
            target,
            source,
            overwrite,
            additive,
            output,
        } => merge::merge(
            ctx,
            &target,
            &source,
            flag_pair(overwrite, additive),
            output.as_deref(),
        ),
        Command::Import {
            target,
            source,
            pages,
            no_pages,
            about,
            keys,
            original_values,
            no_variants,
            languages,
            overwrite,
            output,
        } => {
            let overrides = ImportOverrides {
                pages: flag_pair(pages, no_pages),
                about: about.then_some(true),
                keys: keys.then_some(true),
                original_values: original_values.then_some(true),
                variants: no_variants.then_some(false),
                overwrite: overwrite.then_some(true),
                languages,
            };
            import::import(ctx, &target, &source, overrides, output.as_deref())
        }
        Command::Languages { path } => languages::languages(ctx, &path),
        Command::Export {
            path,
            out_dir,
            page,
        } => export::export(ctx, &path, &out_dir, page.as_deref()),
        Command::Filter {
            path,
            language,
            no_keys,
            no_original_values,
            no_variants,
            output,
        } => {
            let options = FilterOptions {
                include_keys: !no_keys,
                include_original_values: !no_original_values,
                include_variants: !no_variants,
            };
            filter::filter(ctx, &path, &language, options, &output)
        }
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set {
                key,
                value,
                project,
            } => config_cmd::set(ctx, &key, &value, project),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Warn when the engine stopped part-way, so nothing reached `destination`.
pub(crate) fn report_engine_error(
    ctx: &Context,
    err: EngineError,
    destination: &Path,
) -> EngineError {
    if let Some(note) = unsaved_note(&err, destination) {
        output::warn(note, ctx.verbosity);
    }
    err
}

fn unsaved_note(err: &EngineError, destination: &Path) -> Option<String> {
    err.fault().map(|fault| {
        format!(
            "stopped at {}; {} was not saved",
            fault.location,
            destination.display()
        )
    })
}
