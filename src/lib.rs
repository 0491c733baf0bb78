//! Locbook - merge and import for localization documents
//!
//! A locbook is a JSON document of pages, each holding translatable fields
//! with per-language variants, plus document-wide lock flags. This crate
//! reconciles two such documents and ships a `locbook` CLI around that.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, owns all I/O)
//! - [`engine`] - Merge, import and export policies over in-memory documents
//! - [`core`] - Document model, matching, persistence, locking, config
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. Locks on a target are honored for every write in a call
//! 2. Merge and import never delete pages, fields, variants or aliases
//! 3. The engine performs no I/O; a document on disk changes only through
//!    an atomic save after a successful engine call

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
