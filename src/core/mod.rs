//! core
//!
//! Core domain types, persistence, and configuration for locbook.
//!
//! # Modules
//!
//! - [`types`] - Case-insensitive comparison and lock flags
//! - [`model`] - The locbook document model
//! - [`matcher`] - Identity resolution for pages, fields and variants
//! - [`store`] - Loading and atomically saving documents
//! - [`lock`] - Exclusive per-document locking
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The document model mirrors the on-disk JSON exactly
//! - Identity comparisons ignore case everywhere
//! - Writes are atomic; a failed save never leaves a truncated document

pub mod config;
pub mod lock;
pub mod matcher;
pub mod model;
pub mod store;
pub mod types;
