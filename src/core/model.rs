//! core::model
//!
//! The locbook document tree.
//!
//! # Structure
//!
//! ```text
//! Locbook
//! ├── pages: [Page]            identity: page_id
//! │   └── fields: [Field]      identity: key, fallback: alias overlap
//! │       ├── aliases: [String]
//! │       └── variants: [Variant]   identity: language
//! └── lock flags, locked languages, password ciphertext
//! ```
//!
//! Ownership is strictly hierarchical. There are no back-references, so a
//! document can be cloned, compared, and mutated in place freely.
//!
//! # Persisted Form
//!
//! The serde attributes produce the on-disk JSON shape: camelCase names,
//! fields stored under `pageFiles`, and variant values under `_value`.
//! Every property is optional on read. Unknown properties are ignored so that
//! documents written by newer tools still load.
//!
//! # Example
//!
//! ```
//! use locbook::core::model::{Field, Locbook, Page, Variant};
//!
//! let mut book = Locbook::new();
//! book.pages.push(Page {
//!     page_id: "menu".into(),
//!     fields: vec![Field {
//!         key: "start".into(),
//!         original_value: "Start".into(),
//!         variants: vec![Variant::new("fr", "Commencer")],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! });
//!
//! book.set_locked_languages(["de", "ja"]);
//! assert!(book.is_language_locked("DE"));
//! assert_eq!(book.language_codes(), vec!["fr".to_string()]);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::{contains_ignore_case, eq_ignore_case, LockFlag};

/// Separator used when writing the locked-language list.
pub const LANGUAGE_LIST_SEPARATOR: &str = ", ";

/// Root localization document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Locbook {
    /// Pages in display order.
    pub pages: Vec<Page>,

    pub keys_locked: bool,

    pub original_values_locked: bool,

    pub page_ids_locked: bool,

    pub about_pages_locked: bool,

    pub aliases_locked: bool,

    /// Comma-delimited language codes excluded from variant writes.
    ///
    /// Kept in its raw form so that documents that never change their locks
    /// serialize back byte-for-byte. Use [`Locbook::locked_language_codes`]
    /// to read it as a set.
    pub locked_languages: String,

    /// Password ciphertext. Opaque; never interpreted here.
    pub encrypted_password: String,
}

impl Locbook {
    /// Create an empty document with no pages and no locks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an attribute class is locked.
    pub fn is_locked(&self, flag: LockFlag) -> bool {
        match flag {
            LockFlag::Keys => self.keys_locked,
            LockFlag::OriginalValues => self.original_values_locked,
            LockFlag::PageIds => self.page_ids_locked,
            LockFlag::AboutPages => self.about_pages_locked,
            LockFlag::Aliases => self.aliases_locked,
        }
    }

    /// Set or clear a lock flag.
    pub fn set_locked(&mut self, flag: LockFlag, locked: bool) {
        let slot = match flag {
            LockFlag::Keys => &mut self.keys_locked,
            LockFlag::OriginalValues => &mut self.original_values_locked,
            LockFlag::PageIds => &mut self.page_ids_locked,
            LockFlag::AboutPages => &mut self.about_pages_locked,
            LockFlag::Aliases => &mut self.aliases_locked,
        };
        *slot = locked;
    }

    /// The locked language codes, trimmed, with empty entries dropped.
    pub fn locked_language_codes(&self) -> Vec<&str> {
        parse_language_list(&self.locked_languages)
    }

    /// Replace the locked-language list.
    pub fn set_locked_languages<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.locked_languages = join_language_list(codes);
    }

    /// Check whether a language code is locked (case-insensitive).
    pub fn is_language_locked(&self, code: &str) -> bool {
        self.locked_language_codes()
            .iter()
            .any(|locked| eq_ignore_case(locked, code))
    }

    /// Every non-empty variant language in the document.
    ///
    /// Deduplicated case-insensitively. The first spelling seen wins, and
    /// codes appear in the order they are first encountered.
    pub fn language_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for page in &self.pages {
            for field in &page.fields {
                for variant in &field.variants {
                    if !variant.language.is_empty()
                        && !contains_ignore_case(&codes, &variant.language)
                    {
                        codes.push(variant.language.clone());
                    }
                }
            }
        }
        codes
    }

    /// Total number of fields across all pages.
    pub fn field_count(&self) -> usize {
        self.pages.iter().map(|p| p.fields.len()).sum()
    }
}

/// A named group of translatable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub page_id: String,

    /// Free-text description of the page.
    pub about_page: String,

    #[serde(rename = "pageFiles")]
    pub fields: Vec<Field>,
}

/// A single translatable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    pub key: String,

    /// Source-language text.
    pub original_value: String,

    /// Alternate identities for this field.
    pub aliases: Vec<String>,

    pub variants: Vec<Variant>,
}

impl Field {
    /// Look up the variant for a language (case-insensitive, first wins).
    pub fn variant(&self, language: &str) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| eq_ignore_case(&v.language, language))
    }
}

/// One language's translation of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub language: String,

    #[serde(rename = "_value")]
    pub value: String,
}

impl Variant {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// Split a delimited language list into trimmed, non-empty codes.
pub fn parse_language_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .collect()
}

/// Join language codes into the persisted delimited form.
pub fn join_language_list<I, S>(codes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|c| c.as_ref().trim().to_string())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(LANGUAGE_LIST_SEPARATOR)
}
