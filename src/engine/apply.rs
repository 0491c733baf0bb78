//! engine::apply
//!
//! Write steps shared by merge and import.

use crate::core::types::contains_ignore_case;

/// Copy `source` into `target` when allowed and the policy permits.
///
/// The write happens only if `allowed`, `source` is non-empty, and either
/// `target` is empty or `overwrite` is set. Returns whether it happened.
pub(crate) fn fill_text(target: &mut String, source: &str, allowed: bool, overwrite: bool) -> bool {
    if allowed && !source.is_empty() && (target.is_empty() || overwrite) {
        target.clear();
        target.push_str(source);
        true
    } else {
        false
    }
}

/// Append source aliases the target lacks. Never removes or replaces.
///
/// Blank aliases are skipped.
pub(crate) fn union_aliases(target: &mut Vec<String>, source: &[String]) -> usize {
    let mut added = 0;
    for alias in source {
        if alias.trim().is_empty() || contains_ignore_case(target, alias) {
            continue;
        }
        target.push(alias.clone());
        added += 1;
    }
    added
}
