//! merge command - Merge a source document into a target

use crate::cli::Context;
use crate::core::lock::DocumentLock;
use crate::core::store;
use crate::engine::{self, MergeResult};
use crate::ui::output;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Merge `source` into `target`.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `overwrite` - Policy override; `None` uses the configured default
/// * `output` - Destination; `None` rewrites the target
pub fn merge(
    ctx: &Context,
    target: &Path,
    source: &Path,
    overwrite: Option<bool>,
    output: Option<&Path>,
) -> Result<()> {
    let target = ctx.resolve(target);
    let source = ctx.resolve(source);
    let destination = output.map(|p| ctx.resolve(p)).unwrap_or_else(|| target.clone());

    let config = ctx.config()?;
    let overwrite = overwrite.unwrap_or_else(|| config.merge_overwrite());

    let _lock = DocumentLock::acquire(&destination)
        .with_context(|| format!("Failed to lock {}", destination.display()))?;
    output::debug(format!("locked {}", destination.display()), ctx.verbosity);

    let mut book = store::load(&target)
        .with_context(|| format!("Failed to load target {}", target.display()))?;
    let incoming = store::load(&source)
        .with_context(|| format!("Failed to load source {}", source.display()))?;
    output::debug(
        format!(
            "target has {} pages, source has {} pages; overwrite={}",
            book.pages.len(),
            incoming.pages.len(),
            overwrite
        ),
        ctx.verbosity,
    );

    let result = engine::merge(&mut book, &incoming, overwrite)
        .map_err(|err| super::report_engine_error(ctx, err, &destination))
        .context("Merge failed")?;

    store::save(&destination, &book)
        .with_context(|| format!("Failed to save {}", destination.display()))?;
    output::debug(format!("saved {}", destination.display()), ctx.verbosity);

    if ctx.json {
        output::json(&result)?;
    } else {
        output::success(format!("Merged into {}", destination.display()), ctx.verbosity);
        output::print(summary(&result), ctx.verbosity);
    }
    Ok(())
}

fn summary(result: &MergeResult) -> String {
    output::format_counters(&[
        ("pages added", result.pages_added),
        ("pages updated", result.pages_updated),
        ("fields added", result.fields_added),
        ("fields updated", result.fields_updated),
        ("variants added", result.variants_added),
        ("variants updated", result.variants_updated),
        ("language codes added", result.language_codes_added),
    ])
}
