//! new command - Create an empty locbook document

use crate::cli::Context;
use crate::core::lock::DocumentLock;
use crate::core::store;
use crate::ui::output;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Create an empty document at `path`. Refuses to overwrite.
pub fn new(ctx: &Context, path: &Path) -> Result<()> {
    let path = ctx.resolve(path);

    let _lock = DocumentLock::acquire(&path)
        .with_context(|| format!("Failed to lock {}", path.display()))?;
    store::create_new(&path).with_context(|| format!("Failed to create {}", path.display()))?;

    if ctx.json {
        output::json(&serde_json::json!({ "created": path }))?;
    } else {
        output::success(format!("Created {}", path.display()), ctx.verbosity);
    }
    Ok(())
}
