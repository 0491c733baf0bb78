//! engine
//!
//! Reconciliation of two locbook documents.
//!
//! # Architecture
//!
//! The engine folds a *source* document into a *target* document in place.
//! Two policies exist, exposed as two functions:
//!
//! - [`merge`] - symmetric policy under a single `overwrite` flag, followed by
//!   an additive language backfill
//! - [`import`] - asymmetric policy gated per attribute class by
//!   [`ImportOptions`], restricted to an explicit language allow-list, and
//!   propagating lock flags from source to target
//!
//! Both are thin policy layers over shared pieces:
//!
//! ```text
//! core::matcher   identity resolution (page / field / variant)
//! gate::LockGate  snapshot of the target's locks, captured once per call
//! apply           the write steps both policies share
//! ```
//!
//! # Invariants
//!
//! - The engine performs no I/O
//! - Lock state is read once, before any write; writes made during the call
//!   never change what is writable in the same call
//! - Policy skips (locked attribute, locked language, suppressed page) are
//!   not errors; only the result counters reflect them
//! - On failure the target may be partially updated. Callers that need
//!   atomicity run the engine on a clone and keep it only on success.
//!
//! # Example
//!
//! ```
//! use locbook::core::model::{Field, Locbook, Page, Variant};
//! use locbook::engine::merge;
//!
//! let field = |variants: Vec<Variant>| Field {
//!     key: "greet".into(),
//!     original_value: "Hi".into(),
//!     variants,
//!     ..Default::default()
//! };
//! let book = |variants| Locbook {
//!     pages: vec![Page {
//!         page_id: "p1".into(),
//!         fields: vec![field(variants)],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let mut target = book(vec![Variant::new("en", "Hi")]);
//! let source = book(vec![Variant::new("en", "Hi"), Variant::new("fr", "Salut")]);
//!
//! let result = merge(&mut target, &source, false).unwrap();
//! assert_eq!(result.variants_added, 1);
//! assert_eq!(target.pages[0].fields[0].variants[1].value, "Salut");
//! ```

mod apply;
pub mod export;
pub mod gate;
pub mod import;
pub mod merge;

pub use export::{filtered_locbook, FilterOptions};
pub use gate::LockGate;
pub use import::{import, ImportOptions, ImportResult};
pub use merge::{merge, MergeResult};

use std::fmt;

use thiserror::Error;

/// Errors from the merge and import engines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The caller supplied arguments the engine cannot act on.
    ///
    /// Raised before the target is touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A merge stopped part-way through.
    #[error("error during merge: {0}")]
    MergeFailed(#[source] Fault),

    /// An import stopped part-way through.
    #[error("error during import: {0}")]
    ImportFailed(#[source] Fault),
}

impl EngineError {
    /// The underlying fault, if the engine stopped part-way through.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            EngineError::InvalidArgument(_) => None,
            EngineError::MergeFailed(fault) | EngineError::ImportFailed(fault) => Some(fault),
        }
    }
}

/// An internal fault, with the position in the source where it happened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{cause} at {location}")]
pub struct Fault {
    pub location: Location,
    #[source]
    pub cause: FaultCause,
}

/// What went wrong inside a traversal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FaultCause {
    #[error("{counter} counter overflowed")]
    CounterOverflow { counter: &'static str },
}

/// The source page, and optionally field, being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub page_id: String,
    pub field_key: Option<String>,
}

impl Location {
    pub(crate) fn page(page_id: &str) -> Self {
        Self {
            page_id: page_id.to_string(),
            field_key: None,
        }
    }

    pub(crate) fn field(page_id: &str, field_key: &str) -> Self {
        Self {
            page_id: page_id.to_string(),
            field_key: Some(field_key.to_string()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page '{}'", self.page_id)?;
        if let Some(key) = &self.field_key {
            write!(f, ", field '{}'", key)?;
        }
        Ok(())
    }
}

/// Increment a result counter, faulting instead of wrapping.
pub(crate) fn bump(
    counter: &mut u32,
    name: &'static str,
    location: impl FnOnce() -> Location,
) -> Result<(), Fault> {
    *counter = counter.checked_add(1).ok_or_else(|| Fault {
        location: location(),
        cause: FaultCause::CounterOverflow { counter: name },
    })?;
    Ok(())
}
