//! import command - Import selected parts of a source document

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::lock::DocumentLock;
use crate::core::model::Locbook;
use crate::core::store;
use crate::engine::{self, ImportOptions, ImportResult};
use crate::ui::output;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Command-line overrides for the configured import options.
///
/// `None` means "use the config value".
#[derive(Debug, Clone, Default)]
pub struct ImportOverrides {
    pub pages: Option<bool>,
    pub about: Option<bool>,
    pub keys: Option<bool>,
    pub original_values: Option<bool>,
    pub variants: Option<bool>,
    pub overwrite: Option<bool>,
    /// Empty means "use the config value".
    pub languages: Vec<String>,
}

impl ImportOverrides {
    /// Apply the overrides on top of configured options.
    ///
    /// If no languages end up selected, every language in `source` is.
    pub fn resolve(self, config: &Config, source: &Locbook) -> ImportOptions {
        let base = config.import_options();

        let mut selected = if self.languages.is_empty() {
            base.selected_language_codes
        } else {
            self.languages
        };
        if selected.is_empty() {
            selected = source.language_codes();
        }

        ImportOptions {
            import_pages: self.pages.unwrap_or(base.import_pages),
            import_about: self.about.unwrap_or(base.import_about),
            import_keys: self.keys.unwrap_or(base.import_keys),
            import_original_values: self.original_values.unwrap_or(base.import_original_values),
            import_variants: self.variants.unwrap_or(base.import_variants),
            selected_language_codes: selected,
            overwrite_existing: self.overwrite.unwrap_or(base.overwrite_existing),
        }
    }
}

/// Import `source` into `target`.
pub fn import(
    ctx: &Context,
    target: &Path,
    source: &Path,
    overrides: ImportOverrides,
    output: Option<&Path>,
) -> Result<()> {
    let target = ctx.resolve(target);
    let source = ctx.resolve(source);
    let destination = output.map(|p| ctx.resolve(p)).unwrap_or_else(|| target.clone());

    let config = ctx.config()?;

    let _lock = DocumentLock::acquire(&destination)
        .with_context(|| format!("Failed to lock {}", destination.display()))?;
    output::debug(format!("locked {}", destination.display()), ctx.verbosity);

    let mut book = store::load(&target)
        .with_context(|| format!("Failed to load target {}", target.display()))?;
    let incoming = store::load(&source)
        .with_context(|| format!("Failed to load source {}", source.display()))?;

    let options = overrides.resolve(&config, &incoming);
    output::debug(format!("import options: {:?}", options), ctx.verbosity);

    let result = engine::import(&mut book, &incoming, &options)
        .map_err(|err| super::report_engine_error(ctx, err, &destination))
        .context("Import failed")?;

    store::save(&destination, &book)
        .with_context(|| format!("Failed to save {}", destination.display()))?;
    output::debug(format!("saved {}", destination.display()), ctx.verbosity);

    if ctx.json {
        output::json(&result)?;
    } else {
        output::success(format!("Imported into {}", destination.display()), ctx.verbosity);
        output::print(summary(&result), ctx.verbosity);
    }
    Ok(())
}

fn summary(result: &ImportResult) -> String {
    output::format_counters(&[
        ("pages added", result.pages_added),
        ("pages updated", result.pages_updated),
        ("fields added", result.fields_added),
        ("fields updated", result.fields_updated),
        ("variants added", result.variants_added),
        ("variants updated", result.variants_updated),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Field, Page, Variant};

    fn source() -> Locbook {
        Locbook {
            pages: vec![Page {
                page_id: "p".into(),
                fields: vec![Field {
                    key: "k".into(),
                    variants: vec![Variant::new("fr", "a"), Variant::new("de", "b")],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn no_languages_anywhere_selects_all_source_languages() {
        let options = ImportOverrides::default().resolve(&Config::default(), &source());
        assert_eq!(options.selected_language_codes, vec!["fr", "de"]);
        assert_eq!(
            ImportOptions {
                selected_language_codes: Vec::new(),
                ..options
            },
            ImportOptions::default()
        );
    }

    #[test]
    fn command_line_wins() {
        let overrides = ImportOverrides {
            pages: Some(false),
            keys: Some(true),
            variants: Some(false),
            languages: vec!["ja".into()],
            ..Default::default()
        };
        let options = overrides.resolve(&Config::default(), &source());

        assert!(!options.import_pages);
        assert!(options.import_keys);
        assert!(!options.import_variants);
        assert_eq!(options.selected_language_codes, vec!["ja"]);
    }

    #[test]
    fn configured_languages_used_when_none_given() {
        let mut config = Config::default();
        Config::set_value(&mut config.global, "import.languages", "de").unwrap();

        let options = ImportOverrides::default().resolve(&config, &source());

        assert_eq!(options.selected_language_codes, vec!["de"]);
    }
}
