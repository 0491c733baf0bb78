//! engine::export
//!
//! Read-only projections of a locbook: per-language key/value tables, and the
//! single-language "contractor" document handed to a translator.
//!
//! Export tables compare languages exactly, so `fr` and `FR` produce two
//! tables. The contractor filter looks its language up ignoring case.

use std::collections::BTreeMap;

use crate::core::model::{Field, Locbook, Page, Variant};
use crate::core::types::{contains_ignore_case, eq_ignore_case, sort_ignore_case, LockFlag};

/// Field key to translated value, for one language.
pub type LanguageTable = BTreeMap<String, String>;

/// Distinct variant languages, case-insensitive, in first-occurrence order.
pub fn language_codes(book: &Locbook) -> Vec<String> {
    book.language_codes()
}

/// Build the table for `language` across every page.
///
/// Only fields with a non-empty value in exactly `language` contribute. When
/// two fields share a key the later one wins.
pub fn language_table(book: &Locbook, language: &str) -> LanguageTable {
    let mut table = LanguageTable::new();
    for page in &book.pages {
        collect(&page.fields, language, &mut table);
    }
    table
}

/// Build the table for `language` from a single page.
pub fn page_language_table(page: &Page, language: &str) -> LanguageTable {
    let mut table = LanguageTable::new();
    collect(&page.fields, language, &mut table);
    table
}

/// One table per exact language spelling in the document.
pub fn export_tables(book: &Locbook) -> Vec<(String, LanguageTable)> {
    let fields: Vec<&Field> = book.pages.iter().flat_map(|p| &p.fields).collect();
    exact_languages(&fields)
        .into_iter()
        .map(|language| {
            let table = language_table(book, &language);
            (language, table)
        })
        .collect()
}

/// One table per exact language spelling in a single page.
pub fn export_page_tables(page: &Page) -> Vec<(String, LanguageTable)> {
    let fields: Vec<&Field> = page.fields.iter().collect();
    exact_languages(&fields)
        .into_iter()
        .map(|language| {
            let table = page_language_table(page, &language);
            (language, table)
        })
        .collect()
}

fn collect(fields: &[Field], language: &str, table: &mut LanguageTable) {
    for field in fields {
        let value = field
            .variants
            .iter()
            .find(|v| v.language == language)
            .map(|v| v.value.as_str())
            .unwrap_or_default();
        if !value.is_empty() {
            table.insert(field.key.clone(), value.to_string());
        }
    }
}

fn exact_languages(fields: &[&Field]) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for variant in fields.iter().flat_map(|f| &f.variants) {
        if !variant.language.is_empty() && !languages.contains(&variant.language) {
            languages.push(variant.language.clone());
        }
    }
    languages
}

/// Which parts of each field a filtered document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    pub include_keys: bool,
    pub include_original_values: bool,
    pub include_variants: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            include_keys: true,
            include_original_values: true,
            include_variants: true,
        }
    }
}

impl FilterOptions {
    fn includes_anything(&self) -> bool {
        self.include_keys || self.include_original_values || self.include_variants
    }
}

/// Build a single-language copy of `source` for a translator.
///
/// Every field gets exactly one variant in `language`, spelled as given,
/// carrying the source value or empty when the source has none. Page IDs,
/// descriptions, keys and source text are locked in the result, and so is
/// every other language present in `source`. Aliases are not carried.
pub fn filtered_locbook(source: &Locbook, language: &str, options: FilterOptions) -> Locbook {
    let mut filtered = Locbook::new();

    for source_page in &source.pages {
        if !options.includes_anything() {
            break;
        }
        let fields: Vec<Field> = source_page
            .fields
            .iter()
            .map(|field| filter_field(field, language, options))
            .collect();
        if fields.is_empty() {
            continue;
        }
        filtered.pages.push(Page {
            page_id: source_page.page_id.clone(),
            about_page: source_page.about_page.clone(),
            fields,
        });
    }

    for flag in [
        LockFlag::PageIds,
        LockFlag::AboutPages,
        LockFlag::Keys,
        LockFlag::OriginalValues,
    ] {
        filtered.set_locked(flag, true);
    }

    let mut others: Vec<String> = Vec::new();
    for code in source.language_codes() {
        if !eq_ignore_case(&code, language) && !contains_ignore_case(&others, &code) {
            others.push(code);
        }
    }
    sort_ignore_case(&mut others);
    filtered.set_locked_languages(others);

    filtered
}

fn filter_field(field: &Field, language: &str, options: FilterOptions) -> Field {
    let keep = |enabled: bool, value: &str| {
        if enabled {
            value.to_string()
        } else {
            String::new()
        }
    };

    let variants = if options.include_variants {
        let value = field
            .variant(language)
            .map(|v| v.value.clone())
            .unwrap_or_default();
        vec![Variant::new(language, value)]
    } else {
        Vec::new()
    };

    Field {
        key: keep(options.include_keys, &field.key),
        original_value: keep(options.include_original_values, &field.original_value),
        aliases: Vec::new(),
        variants,
    }
}
