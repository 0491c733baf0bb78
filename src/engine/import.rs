//! engine::import
//!
//! Option-gated import of one locbook into another.
//!
//! # Policy
//!
//! Import differs from merge in four ways:
//!
//! 1. Each attribute class has its own switch in [`ImportOptions`]. A write
//!    needs both the switch and the target's lock gate. A switched-off
//!    attribute is left empty even on newly created fields.
//! 2. Variants are copied only for the languages in an explicit allow-list,
//!    and only when the source variant has a value.
//! 3. Missing pages are created only when `import_pages` is set; otherwise
//!    the whole source page is skipped.
//! 4. Lock flags travel with the data: every lock set on the source is set
//!    on the target, and locked languages are unioned. Locks only tighten.
//!
//! There is no language backfill.

use serde::{Deserialize, Serialize};

use super::apply::{fill_text, union_aliases};
use super::gate::LockGate;
use super::{bump, EngineError, Fault, Location};
use crate::core::matcher::{find_matching_field, find_matching_page, find_matching_variant};
use crate::core::model::{Field, Locbook, Page, Variant};
use crate::core::types::{contains_ignore_case, sort_ignore_case, LockFlag};

/// What an import may touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Create pages that exist only in the source.
    pub import_pages: bool,

    /// Copy page descriptions.
    pub import_about: bool,

    pub import_keys: bool,

    pub import_original_values: bool,

    /// Copy variants for `selected_language_codes`.
    pub import_variants: bool,

    /// Languages whose variants are imported, in processing order.
    pub selected_language_codes: Vec<String>,

    /// Replace non-empty target values.
    pub overwrite_existing: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            import_pages: true,
            import_about: false,
            import_keys: false,
            import_original_values: false,
            import_variants: true,
            selected_language_codes: Vec::new(),
            overwrite_existing: false,
        }
    }
}

impl ImportOptions {
    /// Check the options before an import touches anything.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] if the language allow-list
    /// contains a blank code.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self
            .selected_language_codes
            .iter()
            .any(|code| code.trim().is_empty())
        {
            return Err(EngineError::InvalidArgument(
                "selected language codes cannot be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counters describing what an import did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub pages_added: u32,
    pub pages_updated: u32,
    pub fields_added: u32,
    pub fields_updated: u32,
    pub variants_added: u32,
    pub variants_updated: u32,
}

/// Import `source` into `target` in place according to `options`.
///
/// # Errors
///
/// - [`EngineError::InvalidArgument`] if `options` fail validation; `target`
///   is untouched
/// - [`EngineError::ImportFailed`] if the import stops part-way through;
///   `target` may then hold some of the imported changes
pub fn import(
    target: &mut Locbook,
    source: &Locbook,
    options: &ImportOptions,
) -> Result<ImportResult, EngineError> {
    options.validate()?;

    let gate = LockGate::capture(target);
    let mut result = ImportResult::default();

    import_pages(target, source, options, &gate, &mut result).map_err(EngineError::ImportFailed)?;
    propagate_locks(target, source);

    Ok(result)
}

fn import_pages(
    target: &mut Locbook,
    source: &Locbook,
    options: &ImportOptions,
    gate: &LockGate,
    result: &mut ImportResult,
) -> Result<(), Fault> {
    for source_page in &source.pages {
        let at = || Location::page(&source_page.page_id);

        let index = match find_matching_page(&target.pages, source_page) {
            Some(index) => {
                bump(&mut result.pages_updated, "pages_updated", at)?;
                index
            }
            None if options.import_pages => {
                target.pages.push(Page {
                    page_id: source_page.page_id.clone(),
                    about_page: if options.import_about {
                        source_page.about_page.clone()
                    } else {
                        String::new()
                    },
                    fields: Vec::new(),
                });
                bump(&mut result.pages_added, "pages_added", at)?;
                target.pages.len() - 1
            }
            None => continue,
        };
        let target_page = &mut target.pages[index];

        fill_text(
            &mut target_page.about_page,
            &source_page.about_page,
            options.import_about && gate.can_write_about_pages(),
            options.overwrite_existing,
        );

        for source_field in &source_page.fields {
            import_field(target_page, source_page, source_field, options, gate, result)?;
        }
    }
    Ok(())
}

fn import_field(
    target_page: &mut Page,
    source_page: &Page,
    source_field: &Field,
    options: &ImportOptions,
    gate: &LockGate,
    result: &mut ImportResult,
) -> Result<(), Fault> {
    let at = || Location::field(&source_page.page_id, &source_field.key);
    let overwrite = options.overwrite_existing;

    let index = match find_matching_field(&target_page.fields, source_field) {
        Some(index) => {
            bump(&mut result.fields_updated, "fields_updated", at)?;
            index
        }
        None => {
            let copy_if = |enabled: bool, value: &str| {
                if enabled {
                    value.to_string()
                } else {
                    String::new()
                }
            };
            target_page.fields.push(Field {
                key: copy_if(options.import_keys, &source_field.key),
                original_value: copy_if(
                    options.import_original_values,
                    &source_field.original_value,
                ),
                aliases: Vec::new(),
                variants: Vec::new(),
            });
            bump(&mut result.fields_added, "fields_added", at)?;
            target_page.fields.len() - 1
        }
    };
    let target_field = &mut target_page.fields[index];

    fill_text(
        &mut target_field.key,
        &source_field.key,
        options.import_keys && gate.can_write_keys(),
        overwrite,
    );
    fill_text(
        &mut target_field.original_value,
        &source_field.original_value,
        options.import_original_values && gate.can_write_original_values(),
        overwrite,
    );

    if gate.can_write_aliases() {
        union_aliases(&mut target_field.aliases, &source_field.aliases);
    }

    if !options.import_variants {
        return Ok(());
    }

    for code in &options.selected_language_codes {
        if !gate.can_write_language(code) {
            continue;
        }

        let source_value = match find_matching_variant(&source_field.variants, code) {
            Some(i) if !source_field.variants[i].value.is_empty() => &source_field.variants[i].value,
            _ => continue,
        };

        match find_matching_variant(&target_field.variants, code) {
            None => {
                target_field
                    .variants
                    .push(Variant::new(code.as_str(), source_value.as_str()));
                bump(&mut result.variants_added, "variants_added", at)?;
            }
            Some(i) => {
                if fill_text(&mut target_field.variants[i].value, source_value, true, overwrite) {
                    bump(&mut result.variants_updated, "variants_updated", at)?;
                }
            }
        }
    }

    Ok(())
}

/// Tighten the target's locks with the source's.
fn propagate_locks(target: &mut Locbook, source: &Locbook) {
    for flag in LockFlag::ALL {
        if source.is_locked(flag) {
            target.set_locked(flag, true);
        }
    }

    let source_codes = source.locked_language_codes();
    if source_codes.is_empty() {
        return;
    }

    let mut codes: Vec<String> = Vec::new();
    for code in target.locked_language_codes().into_iter().chain(source_codes) {
        if !contains_ignore_case(&codes, code) {
            codes.push(code.to_string());
        }
    }
    sort_ignore_case(&mut codes);
    target.set_locked_languages(codes);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, original: &str, variants: &[(&str, &str)]) -> Field {
        Field {
            key: key.into(),
            original_value: original.into(),
            aliases: Vec::new(),
            variants: variants.iter().map(|(l, v)| Variant::new(*l, *v)).collect(),
        }
    }

    fn page(id: &str, about: &str, fields: Vec<Field>) -> Page {
        Page {
            page_id: id.into(),
            about_page: about.into(),
            fields,
        }
    }

    fn book(pages: Vec<Page>) -> Locbook {
        Locbook {
            pages,
            ..Default::default()
        }
    }

    fn all_on(languages: &[&str]) -> ImportOptions {
        ImportOptions {
            import_pages: true,
            import_about: true,
            import_keys: true,
            import_original_values: true,
            import_variants: true,
            selected_language_codes: languages.iter().map(|l| l.to_string()).collect(),
            overwrite_existing: false,
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let options = ImportOptions::default();
        assert!(options.import_pages);
        assert!(!options.import_about);
        assert!(!options.import_keys);
        assert!(!options.import_original_values);
        assert!(options.import_variants);
        assert!(options.selected_language_codes.is_empty());
        assert!(!options.overwrite_existing);
    }

    #[test]
    fn blank_language_code_is_invalid_argument() {
        let mut target = book(vec![page("p1", "", vec![])]);
        let before = target.clone();
        let source = book(vec![page("p2", "", vec![])]);

        let err = import(&mut target, &source, &all_on(&["fr", " "])).unwrap_err();

        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert_eq!(target, before);
    }

    #[test]
    fn page_creation_suppressed() {
        let mut target = book(vec![page("p1", "", vec![])]);
        let source = book(vec![page("p2", "About", vec![field("k", "v", &[])])]);
        let options = ImportOptions {
            import_pages: false,
            ..all_on(&[])
        };

        let result = import(&mut target, &source, &options).unwrap();

        assert_eq!(target.pages.len(), 1);
        assert_eq!(result, ImportResult::default());
    }

    #[test]
    fn suppressed_pages_still_update_existing() {
        let mut target = book(vec![page("p1", "", vec![field("k", "", &[])])]);
        let source = book(vec![page("P1", "", vec![field("k", "v", &[])])]);
        let options = ImportOptions {
            import_pages: false,
            ..all_on(&[])
        };

        let result = import(&mut target, &source, &options).unwrap();

        assert_eq!(result.pages_updated, 1);
        assert_eq!(target.pages[0].fields[0].original_value, "v");
    }

    #[test]
    fn disabled_attributes_stay_empty_on_new_fields() {
        let mut target = book(vec![]);
        let source = book(vec![page(
            "p1",
            "About",
            vec![field("greet", "Hi", &[("fr", "Salut")])],
        )]);

        let result = import(&mut target, &source, &ImportOptions::default()).unwrap();

        assert_eq!(result.pages_added, 1);
        assert_eq!(result.fields_added, 1);
        assert_eq!(result.variants_added, 0);
        let created = &target.pages[0];
        assert_eq!(created.about_page, "");
        assert_eq!(created.fields[0].key, "");
        assert_eq!(created.fields[0].original_value, "");
        assert!(created.fields[0].variants.is_empty());
    }

    #[test]
    fn enabled_attributes_copy_on_new_fields() {
        let mut target = book(vec![]);
        let source = book(vec![page(
            "p1",
            "About",
            vec![field("greet", "Hi", &[("fr", "Salut"), ("de", "Hallo")])],
        )]);

        let result = import(&mut target, &source, &all_on(&["FR"])).unwrap();

        assert_eq!(result.variants_added, 1);
        let created = &target.pages[0];
        assert_eq!(created.about_page, "About");
        assert_eq!(created.fields[0].key, "greet");
        assert_eq!(created.fields[0].original_value, "Hi");
        // The allow-list spelling names the new variant.
        assert_eq!(created.fields[0].variants, vec![Variant::new("FR", "Salut")]);
    }

    #[test]
    fn variants_only_for_selected_languages() {
        let mut target = book(vec![page("p1", "", vec![field("greet", "", &[("fr", "")])])]);
        let source = book(vec![page(
            "p1",
            "",
            vec![field("greet", "", &[("fr", "Salut"), ("de", "Hallo"), ("ja", "")])],
        )]);

        let result = import(&mut target, &source, &all_on(&["fr", "ja", "es"])).unwrap();

        assert_eq!(result.variants_updated, 1);
        assert_eq!(result.variants_added, 0);
        let variants = &target.pages[0].fields[0].variants;
        assert_eq!(variants, &vec![Variant::new("fr", "Salut")]);
    }

    #[test]
    fn variants_skipped_when_disabled_or_list_empty() {
        let source = book(vec![page("p1", "", vec![field("greet", "", &[("fr", "Salut")])])]);

        let mut target = book(vec![page("p1", "", vec![field("greet", "", &[])])]);
        let disabled = ImportOptions {
            import_variants: false,
            ..all_on(&["fr"])
        };
        import(&mut target, &source, &disabled).unwrap();
        assert!(target.pages[0].fields[0].variants.is_empty());

        let result = import(&mut target, &source, &all_on(&[])).unwrap();
        assert_eq!(result.variants_added, 0);
        assert!(target.pages[0].fields[0].variants.is_empty());
    }

    #[test]
    fn overwrite_existing_controls_updates() {
        let source = book(vec![page(
            "p1",
            "New",
            vec![field("greet", "Hello", &[("fr", "Bonjour")])],
        )]);
        let original = book(vec![page(
            "p1",
            "Old",
            vec![field("greet", "Hi", &[("fr", "Salut")])],
        )]);

        let mut additive = original.clone();
        let result = import(&mut additive, &source, &all_on(&["fr"])).unwrap();
        assert_eq!(result.variants_updated, 0);
        assert_eq!(additive, original);

        let mut overwrite = original.clone();
        let options = ImportOptions {
            overwrite_existing: true,
            ..all_on(&["fr"])
        };
        let result = import(&mut overwrite, &source, &options).unwrap();
        assert_eq!(result.variants_updated, 1);
        assert_eq!(overwrite.pages[0].about_page, "New");
        assert_eq!(overwrite.pages[0].fields[0].original_value, "Hello");
        assert_eq!(overwrite.pages[0].fields[0].variants[0].value, "Bonjour");
    }

    #[test]
    fn locks_gate_enabled_attributes() {
        let mut target = book(vec![page(
            "p1",
            "Old",
            vec![field("greet", "Hi", &[("fr", "Salut")])],
        )]);
        target.keys_locked = true;
        target.original_values_locked = true;
        target.about_pages_locked = true;
        target.locked_languages = "FR".into();
        let mut source_field = field("greet", "Hello", &[("fr", "Bonjour")]);
        source_field.aliases = vec!["GREET".into(), "greeting".into()];
        let source = book(vec![page("p1", "New", vec![source_field])]);
        let options = ImportOptions {
            overwrite_existing: true,
            ..all_on(&["fr"])
        };

        let result = import(&mut target, &source, &options).unwrap();

        assert_eq!(result.variants_updated, 0);
        let page = &target.pages[0];
        assert_eq!(page.about_page, "Old");
        assert_eq!(page.fields[0].original_value, "Hi");
        assert_eq!(page.fields[0].variants[0].value, "Salut");
        // Aliases have no import switch, only the lock.
        assert_eq!(page.fields[0].aliases, vec!["GREET", "greeting"]);
    }

    #[test]
    fn aliases_locked_blocks_union() {
        let mut target = book(vec![page("p1", "", vec![field("greet", "", &[])])]);
        target.aliases_locked = true;
        let mut source_field = field("greet", "", &[]);
        source_field.aliases = vec!["hello".into()];
        let source = book(vec![page("p1", "", vec![source_field])]);

        import(&mut target, &source, &all_on(&[])).unwrap();

        assert!(target.pages[0].fields[0].aliases.is_empty());
    }

    #[test]
    fn new_field_gets_aliases_through_union() {
        let mut target = book(vec![page("p1", "", vec![])]);
        let mut source_field = field("greet", "", &[]);
        source_field.aliases = vec!["hello".into()];
        let source = book(vec![page("p1", "", vec![source_field])]);

        import(&mut target, &source, &ImportOptions::default()).unwrap();

        assert_eq!(target.pages[0].fields[0].aliases, vec!["hello"]);
    }

    #[test]
    fn locks_propagate_one_way() {
        let mut target = book(vec![]);
        target.original_values_locked = true;
        target.locked_languages = "ja, DE".into();
        let mut source = book(vec![]);
        source.keys_locked = true;
        source.page_ids_locked = true;
        source.aliases_locked = true;
        source.locked_languages = "fr,de".into();

        import(&mut target, &source, &ImportOptions::default()).unwrap();

        assert!(target.keys_locked);
        assert!(target.page_ids_locked);
        assert!(target.aliases_locked);
        assert!(target.original_values_locked);
        assert!(!target.about_pages_locked);
        assert_eq!(target.locked_languages, "DE, fr, ja");
    }

    #[test]
    fn propagated_languages_sort_ignoring_case() {
        let mut target = book(vec![]);
        target.locked_languages = "de".into();
        let mut source = book(vec![]);
        source.locked_languages = "FR".into();

        import(&mut target, &source, &ImportOptions::default()).unwrap();

        assert_eq!(target.locked_languages, "de, FR");
    }

    #[test]
    fn unlocked_source_leaves_locked_languages_verbatim() {
        let mut target = book(vec![]);
        target.locked_languages = "ja,fr".into();

        import(&mut target, &book(vec![]), &ImportOptions::default()).unwrap();

        assert_eq!(target.locked_languages, "ja,fr");
    }

    #[test]
    fn propagated_locks_do_not_gate_same_call() {
        let mut target = book(vec![page("p1", "", vec![field("greet", "", &[])])]);
        let mut source = book(vec![page("p1", "", vec![field("greet", "Hi", &[])])]);
        source.original_values_locked = true;

        import(&mut target, &source, &all_on(&[])).unwrap();

        assert!(target.original_values_locked);
        assert_eq!(target.pages[0].fields[0].original_value, "Hi");
    }

    #[test]
    fn password_untouched() {
        let mut target = book(vec![]);
        target.encrypted_password = "mine".into();
        let mut source = book(vec![]);
        source.encrypted_password = "theirs".into();

        import(&mut target, &source, &all_on(&[])).unwrap();

        assert_eq!(target.encrypted_password, "mine");
    }
}
