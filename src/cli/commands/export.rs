//! export command - Write per-language key/value JSON files

use crate::cli::Context;
use crate::core::store;
use crate::core::types::eq_ignore_case;
use crate::engine::export::{export_page_tables, export_tables, LanguageTable};
use crate::ui::output;
use anyhow::{anyhow, Context as _, Result};
use std::path::{Path, PathBuf};

/// Export `path` into `out_dir`, whole document or a single page.
pub fn export(ctx: &Context, path: &Path, out_dir: &Path, page: Option<&str>) -> Result<()> {
    let path = ctx.resolve(path);
    let out_dir = ctx.resolve(out_dir);
    let book = store::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;

    let (prefix, tables) = match page {
        Some(page_id) => {
            let page = book
                .pages
                .iter()
                .find(|p| eq_ignore_case(&p.page_id, page_id))
                .ok_or_else(|| anyhow!("No page '{}' in {}", page_id, path.display()))?;
            (page.page_id.clone(), export_page_tables(page))
        }
        None => (ctx.config()?.export_prefix(), export_tables(&book)),
    };

    let mut written: Vec<PathBuf> = Vec::with_capacity(tables.len());
    for (language, table) in &tables {
        let file = out_dir.join(format!("{}_{}.json", prefix, language));
        write_table(&file, table)?;
        output::debug(
            format!("wrote {} entries to {}", table.len(), file.display()),
            ctx.verbosity,
        );
        written.push(file);
    }

    if ctx.json {
        output::json(&written)?;
    } else if written.is_empty() {
        output::warn("document has no languages; nothing exported", ctx.verbosity);
    } else {
        output::success(
            format!("Exported {} languages to {}", written.len(), out_dir.display()),
            ctx.verbosity,
        );
    }
    Ok(())
}

fn write_table(file: &Path, table: &LanguageTable) -> Result<()> {
    let contents = serde_json::to_string_pretty(table).context("Failed to serialize table")?;
    store::write_atomic(file, contents.as_bytes())
        .with_context(|| format!("Failed to write {}", file.display()))
}
