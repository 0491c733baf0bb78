//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output goes through this module so verbosity and `--json`
//! are handled in one place. The library layers below it never print.

pub mod output;
