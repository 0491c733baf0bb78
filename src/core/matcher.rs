//! core::matcher
//!
//! Identity resolution between two locbook documents.
//!
//! # Rules
//!
//! - **Page**: same `page_id`, ignoring case.
//! - **Field**: same key, OR either key is an alias of the other field, OR the
//!   alias sets intersect. All comparisons ignore case. The relation is
//!   symmetric.
//! - **Variant**: same `language`, ignoring case.
//!
//! # Invariants
//!
//! - Lookups are pure and never allocate
//! - The first candidate in declared order wins; there is no best-match
//!   scoring. Duplicate page IDs in a target always resolve to the first.
//!
//! The `find_*` functions return indices so callers can take a mutable
//! borrow of the matched entity after the lookup ends.
//!
//! # Example
//!
//! ```
//! use locbook::core::matcher::{fields_match, find_matching_field};
//! use locbook::core::model::Field;
//!
//! let existing = Field {
//!     key: "menu.start".into(),
//!     aliases: vec!["start_button".into()],
//!     ..Default::default()
//! };
//! let incoming = Field {
//!     key: "START_BUTTON".into(),
//!     ..Default::default()
//! };
//!
//! assert!(fields_match(&existing, &incoming));
//! assert_eq!(find_matching_field(&[existing], &incoming), Some(0));
//! ```

use crate::core::model::{Field, Page, Variant};
use crate::core::types::{contains_ignore_case, eq_ignore_case};

/// Index of the first page whose ID matches `source`'s.
pub fn find_matching_page(pages: &[Page], source: &Page) -> Option<usize> {
    pages
        .iter()
        .position(|p| eq_ignore_case(&p.page_id, &source.page_id))
}

/// Index of the first field that matches `source` by key or alias.
pub fn find_matching_field(fields: &[Field], source: &Field) -> Option<usize> {
    fields.iter().position(|f| fields_match(f, source))
}

/// Index of the first variant in `language`.
pub fn find_matching_variant(variants: &[Variant], language: &str) -> Option<usize> {
    variants
        .iter()
        .position(|v| eq_ignore_case(&v.language, language))
}

/// Decide whether two fields denote the same translatable unit.
pub fn fields_match(a: &Field, b: &Field) -> bool {
    eq_ignore_case(&a.key, &b.key)
        || contains_ignore_case(&a.aliases, &b.key)
        || contains_ignore_case(&b.aliases, &a.key)
        || a.aliases
            .iter()
            .any(|alias| contains_ignore_case(&b.aliases, alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, aliases: &[&str]) -> Field {
        Field {
            key: key.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    fn page(id: &str, about: &str) -> Page {
        Page {
            page_id: id.into(),
            about_page: about.into(),
            ..Default::default()
        }
    }

    mod pages {
        use super::*;

        #[test]
        fn matches_ignoring_case() {
            let pages = vec![page("intro", ""), page("Menu", "")];
            assert_eq!(find_matching_page(&pages, &page("MENU", "")), Some(1));
        }

        #[test]
        fn no_match_is_none() {
            let pages = vec![page("intro", "")];
            assert_eq!(find_matching_page(&pages, &page("outro", "")), None);
            assert_eq!(find_matching_page(&[], &page("intro", "")), None);
        }

        #[test]
        fn duplicate_ids_resolve_to_first() {
            let pages = vec![page("a", "first"), page("A", "second")];
            assert_eq!(find_matching_page(&pages, &page("a", "")), Some(0));
        }
    }

    mod fields {
        use super::*;

        #[test]
        fn key_equality() {
            assert!(fields_match(&field("Greet", &[]), &field("greet", &[])));
            assert!(!fields_match(&field("greet", &[]), &field("bye", &[])));
        }

        #[test]
        fn key_in_other_alias_set_both_directions() {
            let target = field("greeting", &["hello"]);
            let source = field("HELLO", &[]);
            assert!(fields_match(&target, &source));
            assert!(fields_match(&source, &target));
        }

        #[test]
        fn alias_sets_intersect() {
            let target = field("a", &["x", "shared"]);
            let source = field("b", &["SHARED"]);
            assert!(fields_match(&target, &source));
        }

        #[test]
        fn disjoint_aliases_do_not_match() {
            assert!(!fields_match(&field("a", &["x"]), &field("b", &["y"])));
        }

        #[test]
        fn empty_keys_match_each_other() {
            assert!(fields_match(&field("", &[]), &field("", &[])));
        }

        #[test]
        fn first_match_wins_over_better_match() {
            let fields = vec![field("other", &["greet"]), field("greet", &[])];
            assert_eq!(find_matching_field(&fields, &field("greet", &[])), Some(0));
        }
    }

    mod variants {
        use super::*;

        #[test]
        fn matches_language_ignoring_case() {
            let variants = vec![Variant::new("en", "Hi"), Variant::new("fr", "Salut")];
            assert_eq!(find_matching_variant(&variants, "FR"), Some(1));
            assert_eq!(find_matching_variant(&variants, "de"), None);
        }

        #[test]
        fn duplicate_languages_resolve_to_first() {
            let variants = vec![Variant::new("en", "one"), Variant::new("EN", "two")];
            assert_eq!(find_matching_variant(&variants, "en"), Some(0));
        }
    }
}
