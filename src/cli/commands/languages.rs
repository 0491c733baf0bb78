//! languages command - List the languages used in a document

use crate::cli::Context;
use crate::core::store;
use crate::engine::export::language_codes;
use crate::ui::output;
use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::Path;

/// One language as reported by `--json`.
#[derive(Debug, Serialize)]
struct LanguageEntry {
    code: String,
    locked: bool,
}

/// Print distinct language codes in first-occurrence order, one per line.
///
/// Codes listed in the document's `lockedLanguages` are marked.
pub fn languages(ctx: &Context, path: &Path) -> Result<()> {
    let path = ctx.resolve(path);
    let book = store::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;

    let entries: Vec<LanguageEntry> = language_codes(&book)
        .into_iter()
        .map(|code| LanguageEntry {
            locked: book.is_language_locked(&code),
            code,
        })
        .collect();
    output::debug(
        format!("{} pages, {} fields", book.pages.len(), book.field_count()),
        ctx.verbosity,
    );

    if ctx.json {
        output::json(&entries)?;
    } else if !entries.is_empty() {
        let lines: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.locked {
                    format!("{} (locked)", e.code)
                } else {
                    e.code.clone()
                }
            })
            .collect();
        // Listing is the command's result, so it prints even with --quiet.
        println!("{}", output::format_list(&lines, ""));
    }
    Ok(())
}
