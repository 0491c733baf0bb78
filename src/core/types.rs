//! core::types
//!
//! Small shared types for the locbook domain.
//!
//! # Types
//!
//! - [`LockFlag`] - The five attribute classes a document can lock
//! - [`eq_ignore_case`] - Case-insensitive identity comparison
//!
//! # Identity
//!
//! Every identity in a locbook (page IDs, field keys, aliases, language
//! codes) compares case-insensitively, one character at a time. A character
//! whose uppercase form is a single character folds to it; any other
//! character stays as it is. So `"straße"` and `"STRASSE"` are different
//! identities, because `ß` uppercases to two characters.
//!
//! # Examples
//!
//! ```
//! use locbook::core::types::{eq_ignore_case, LockFlag};
//!
//! assert!(eq_ignore_case("Greeting", "GREETING"));
//! assert!(!eq_ignore_case("greet", "greeting"));
//!
//! assert_eq!(LockFlag::ALL.len(), 5);
//! assert_eq!(LockFlag::Keys.json_name(), "keysLocked");
//! ```

use serde::{Deserialize, Serialize};

/// Compare two identity strings case-insensitively.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars().map(fold_case).eq(b.chars().map(fold_case))
}

/// One-to-one uppercase mapping.
fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Check whether `needle` is present in `haystack`, ignoring case.
pub fn contains_ignore_case<S: AsRef<str>>(haystack: &[S], needle: &str) -> bool {
    haystack.iter().any(|s| eq_ignore_case(s.as_ref(), needle))
}

/// Sort alphabetically ignoring case. Equal keys keep their order.
pub fn sort_ignore_case(items: &mut [String]) {
    items.sort_by_cached_key(|s| s.to_lowercase());
}

/// An attribute class that a locbook can lock against modification.
///
/// Each flag lives on the root document. When set on a merge or import
/// target, the engines skip writes to that attribute class.
///
/// # Invariants
///
/// - A flag is binary: locked or not
/// - Import can set flags on a target but never clears them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockFlag {
    /// Field keys.
    Keys,

    /// Field original (source-language) values.
    OriginalValues,

    /// Page identifiers.
    ///
    /// Stored and propagated for compatibility. Neither engine consults it.
    PageIds,

    /// Page descriptions.
    AboutPages,

    /// Field alias sets.
    Aliases,
}

impl LockFlag {
    /// Every lock flag, in document order.
    pub const ALL: [LockFlag; 5] = [
        LockFlag::Keys,
        LockFlag::OriginalValues,
        LockFlag::PageIds,
        LockFlag::AboutPages,
        LockFlag::Aliases,
    ];

    /// The property name used for this flag in the persisted document.
    pub fn json_name(&self) -> &'static str {
        match self {
            LockFlag::Keys => "keysLocked",
            LockFlag::OriginalValues => "originalValuesLocked",
            LockFlag::PageIds => "pageIdsLocked",
            LockFlag::AboutPages => "aboutPagesLocked",
            LockFlag::Aliases => "aliasesLocked",
        }
    }

    /// Human-readable description of the protected attribute class.
    pub fn description(&self) -> &'static str {
        match self {
            LockFlag::Keys => "field keys",
            LockFlag::OriginalValues => "original values",
            LockFlag::PageIds => "page ids",
            LockFlag::AboutPages => "page descriptions",
            LockFlag::Aliases => "field aliases",
        }
    }
}

impl std::fmt::Display for LockFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod identity {
        use super::*;

        #[test]
        fn ascii_case_folds() {
            assert!(eq_ignore_case("pageOne", "PAGEONE"));
            assert!(eq_ignore_case("", ""));
            assert!(!eq_ignore_case("en", "en-US"));
        }

        #[test]
        fn unicode_case_folds() {
            assert!(eq_ignore_case("Ünïcode", "üNÏCODE"));
            assert!(!eq_ignore_case("ü", "u"));
        }

        #[test]
        fn expanding_uppercase_does_not_fold() {
            assert!(!eq_ignore_case("straße", "STRASSE"));
            assert!(!eq_ignore_case("straße", "strasse"));
            assert!(eq_ignore_case("straße", "STRAßE"));
            assert!(!contains_ignore_case(&["strasse"], "straße"));
        }

        #[test]
        fn sort_ignores_case() {
            let mut codes = vec!["FR".to_string(), "de".into(), "Ja".into(), "en".into()];
            sort_ignore_case(&mut codes);
            assert_eq!(codes, vec!["de", "en", "FR", "Ja"]);
        }

        #[test]
        fn contains_checks_every_entry() {
            let aliases = vec!["hello".to_string(), "Greeting".to_string()];
            assert!(contains_ignore_case(&aliases, "GREETING"));
            assert!(!contains_ignore_case(&aliases, "farewell"));
            assert!(!contains_ignore_case::<String>(&[], "x"));
        }
    }

    mod lock_flag {
        use super::*;

        #[test]
        fn json_names_are_distinct() {
            let mut names: Vec<_> = LockFlag::ALL.iter().map(|f| f.json_name()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), LockFlag::ALL.len());
        }

        #[test]
        fn display_uses_description() {
            assert_eq!(format!("{}", LockFlag::Aliases), "field aliases");
        }
    }
}
