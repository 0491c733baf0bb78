//! config command - Get, set, or list configuration values

use crate::cli::Context;
use crate::core::config::{self, Config};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Print the effective value of a key.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = ctx.config()?;
    let value = config.get(key)?;

    if ctx.json {
        output::json(&serde_json::json!({ "key": key, "value": value }))?;
    } else if !value.is_empty() {
        println!("{}", value);
    }
    Ok(())
}

/// Set a key in the global config, or the project config with `project`.
pub fn set(ctx: &Context, key: &str, value: &str, project: bool) -> Result<()> {
    let path = if project {
        Config::project_config_path(&ctx.cwd)
    } else {
        Config::global_write_path()?
    };

    let mut file = Config::read_or_default(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Config::set_value(&mut file, key, value)?;
    Config::write(&path, &file).context("Failed to write config")?;

    output::debug(format!("wrote {}", path.display()), ctx.verbosity);
    output::success(format!("Set {} = {}", key, value), ctx.verbosity);
    Ok(())
}

/// List every key with its effective value.
pub fn list(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;

    let mut entries = Vec::with_capacity(config::KEYS.len());
    for key in config::KEYS {
        entries.push((*key, config.get(key)?));
    }

    if ctx.json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect();
        output::json(&map)?;
        return Ok(());
    }

    let describe = |path: Option<&std::path::Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };
    println!("# global: {}", describe(config.global_config_loaded_from()));
    println!("# project: {}", describe(config.project_config_loaded_from()));
    for (key, value) in entries {
        println!("{} = {}", key, value);
    }
    Ok(())
}
