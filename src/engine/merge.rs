//! engine::merge
//!
//! Symmetric merge of one locbook into another.
//!
//! # Policy
//!
//! A single `overwrite` flag decides conflicts:
//!
//! - **Additive** (`overwrite = false`): values are filled only where the
//!   target is empty, and afterwards every target field receives an empty
//!   variant slot for each language the source knows about.
//! - **Overwrite** (`overwrite = true`): non-empty source values replace
//!   target values. No language backfill runs.
//!
//! Pages, fields and variants missing from the target are created in both
//! modes. Aliases are always unioned, never replaced. Every attribute write
//! is gated by the target's [`LockGate`].

use serde::{Deserialize, Serialize};

use super::apply::{fill_text, union_aliases};
use super::gate::LockGate;
use super::{bump, EngineError, Fault, Location};
use crate::core::matcher::{find_matching_field, find_matching_page, find_matching_variant};
use crate::core::model::{Field, Locbook, Page, Variant};
use crate::core::types::contains_ignore_case;

/// Counters describing what a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    pub pages_added: u32,
    pub pages_updated: u32,
    pub fields_added: u32,
    pub fields_updated: u32,
    pub variants_added: u32,
    pub variants_updated: u32,
    /// Empty variant slots created by the additive backfill.
    pub language_codes_added: u32,
}

/// Merge `source` into `target` in place.
///
/// Source pages are processed in order. Pages are matched by ID, fields by
/// key or alias, variants by language; anything unmatched is appended.
///
/// # Errors
///
/// Returns [`EngineError::MergeFailed`] if the merge stops part-way through.
/// `target` may then hold some of the merged changes.
pub fn merge(
    target: &mut Locbook,
    source: &Locbook,
    overwrite: bool,
) -> Result<MergeResult, EngineError> {
    let gate = LockGate::capture(target);
    let mut result = MergeResult::default();

    merge_pages(target, source, overwrite, &gate, &mut result).map_err(EngineError::MergeFailed)?;

    if !overwrite {
        let languages = source.language_codes();
        backfill_languages(target, &languages, &gate, &mut result)
            .map_err(EngineError::MergeFailed)?;
    }

    Ok(result)
}

fn merge_pages(
    target: &mut Locbook,
    source: &Locbook,
    overwrite: bool,
    gate: &LockGate,
    result: &mut MergeResult,
) -> Result<(), Fault> {
    for source_page in &source.pages {
        let at = || Location::page(&source_page.page_id);

        let index = match find_matching_page(&target.pages, source_page) {
            Some(index) => {
                bump(&mut result.pages_updated, "pages_updated", at)?;
                index
            }
            None => {
                target.pages.push(Page {
                    page_id: source_page.page_id.clone(),
                    about_page: source_page.about_page.clone(),
                    fields: Vec::new(),
                });
                bump(&mut result.pages_added, "pages_added", at)?;
                target.pages.len() - 1
            }
        };
        let target_page = &mut target.pages[index];

        fill_text(
            &mut target_page.about_page,
            &source_page.about_page,
            gate.can_write_about_pages(),
            overwrite,
        );

        for source_field in &source_page.fields {
            merge_field(target_page, source_page, source_field, overwrite, gate, result)?;
        }
    }
    Ok(())
}

fn merge_field(
    target_page: &mut Page,
    source_page: &Page,
    source_field: &Field,
    overwrite: bool,
    gate: &LockGate,
    result: &mut MergeResult,
) -> Result<(), Fault> {
    let at = || Location::field(&source_page.page_id, &source_field.key);

    let index = match find_matching_field(&target_page.fields, source_field) {
        Some(index) => {
            bump(&mut result.fields_updated, "fields_updated", at)?;
            index
        }
        None => {
            target_page.fields.push(Field {
                key: source_field.key.clone(),
                original_value: source_field.original_value.clone(),
                aliases: source_field.aliases.clone(),
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
        gate.can_write_keys(),
        overwrite,
    );
    fill_text(
        &mut target_field.original_value,
        &source_field.original_value,
        gate.can_write_original_values(),
        overwrite,
    );

    if gate.can_write_aliases() {
        union_aliases(&mut target_field.aliases, &source_field.aliases);
    }

    for source_variant in &source_field.variants {
        if source_variant.language.is_empty() || !gate.can_write_language(&source_variant.language)
        {
            continue;
        }

        match find_matching_variant(&target_field.variants, &source_variant.language) {
            None => {
                target_field.variants.push(source_variant.clone());
                bump(&mut result.variants_added, "variants_added", at)?;
            }
            Some(i) => {
                if fill_text(
                    &mut target_field.variants[i].value,
                    &source_variant.value,
                    true,
                    overwrite,
                ) {
                    bump(&mut result.variants_updated, "variants_updated", at)?;
                }
            }
        }
    }

    Ok(())
}

/// Give every target field an empty variant for each writable language.
///
/// Covers all target fields, including ones the source never touched.
fn backfill_languages(
    target: &mut Locbook,
    languages: &[String],
    gate: &LockGate,
    result: &mut MergeResult,
) -> Result<(), Fault> {
    let writable: Vec<&String> = languages
        .iter()
        .filter(|code| gate.can_write_language(code))
        .collect();
    if writable.is_empty() {
        return Ok(());
    }

    for page in &mut target.pages {
        for field in &mut page.fields {
            let existing: Vec<String> = field.variants.iter().map(|v| v.language.clone()).collect();

            for code in &writable {
                if contains_ignore_case(&existing, code) {
                    continue;
                }
                field.variants.push(Variant::new(code.as_str(), ""));
                bump(&mut result.language_codes_added, "language_codes_added", || {
                    Location::field(&page.page_id, &field.key)
                })?;
            }
        }
    }
    Ok(())
}
