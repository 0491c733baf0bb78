//! filter command - Write a single-language copy for a translator

use crate::cli::Context;
use crate::core::lock::DocumentLock;
use crate::core::store;
use crate::engine::{filtered_locbook, FilterOptions};
use crate::ui::output;
use anyhow::{bail, Context as _, Result};
use std::path::Path;

/// Filter `path` down to `language` and save it to `output_path`.
pub fn filter(
    ctx: &Context,
    path: &Path,
    language: &str,
    options: FilterOptions,
    output_path: &Path,
) -> Result<()> {
    let language = language.trim();
    if language.is_empty() {
        bail!("Language code cannot be blank");
    }

    let path = ctx.resolve(path);
    let destination = ctx.resolve(output_path);

    let book = store::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;
    let filtered = filtered_locbook(&book, language, options);
    output::debug(
        format!(
            "kept {} of {} pages; locked languages: '{}'",
            filtered.pages.len(),
            book.pages.len(),
            filtered.locked_languages
        ),
        ctx.verbosity,
    );

    let _lock = DocumentLock::acquire(&destination)
        .with_context(|| format!("Failed to lock {}", destination.display()))?;
    store::save(&destination, &filtered)
        .with_context(|| format!("Failed to save {}", destination.display()))?;

    if ctx.json {
        output::json(&serde_json::json!({
            "output": destination,
            "language": language,
            "pages": filtered.pages.len(),
            "fields": filtered.field_count(),
        }))?;
    } else {
        output::success(
            format!(
                "Wrote {} fields in '{}' to {}",
                filtered.field_count(),
                language,
                destination.display()
            ),
            ctx.verbosity,
        );
    }
    Ok(())
}
