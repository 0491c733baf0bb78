//! engine::gate
//!
//! Lock gating for engine writes.
//!
//! # Architecture
//!
//! A [`LockGate`] is an immutable snapshot of a target document's lock
//! state. Each engine captures one at the start of a call and consults it
//! before every attribute write. Because it is a snapshot, locks that an
//! import propagates onto the target take effect on the *next* call, never
//! halfway through the current one.
//!
//! # Invariants
//!
//! - Gating never mutates any document
//! - Gating is deterministic given the same snapshot
//! - Language checks ignore case; the candidate code is compared as given
//!
//! # Example
//!
//! ```
//! use locbook::core::model::Locbook;
//! use locbook::engine::LockGate;
//!
//! let mut book = Locbook::new();
//! book.keys_locked = true;
//! book.locked_languages = "fr, de".into();
//!
//! let gate = LockGate::capture(&book);
//! assert!(!gate.can_write_keys());
//! assert!(gate.can_write_original_values());
//! assert!(!gate.can_write_language("FR"));
//! assert!(gate.can_write_language("en"));
//! ```

use std::collections::HashSet;

use crate::core::model::Locbook;
use crate::core::types::{contains_ignore_case, LockFlag};

/// Snapshot of which attribute classes and languages are writable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockGate {
    locked: HashSet<LockFlag>,
    locked_languages: Vec<String>,
}

impl LockGate {
    /// Capture the lock state of `target`.
    pub fn capture(target: &Locbook) -> Self {
        Self {
            locked: LockFlag::ALL
                .into_iter()
                .filter(|flag| target.is_locked(*flag))
                .collect(),
            locked_languages: target
                .locked_language_codes()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Check whether an attribute class may be written.
    pub fn can_write(&self, flag: LockFlag) -> bool {
        !self.locked.contains(&flag)
    }

    pub fn can_write_keys(&self) -> bool {
        self.can_write(LockFlag::Keys)
    }

    pub fn can_write_original_values(&self) -> bool {
        self.can_write(LockFlag::OriginalValues)
    }

    /// Whether page IDs may be written.
    ///
    /// Neither engine ever rewrites a page ID, so this is not consulted
    /// during merge or import.
    pub fn can_write_page_ids(&self) -> bool {
        self.can_write(LockFlag::PageIds)
    }

    pub fn can_write_about_pages(&self) -> bool {
        self.can_write(LockFlag::AboutPages)
    }

    pub fn can_write_aliases(&self) -> bool {
        self.can_write(LockFlag::Aliases)
    }

    /// Check whether variants in `code` may be created or updated.
    pub fn can_write_language(&self, code: &str) -> bool {
        !contains_ignore_case(&self.locked_languages, code)
    }
}
