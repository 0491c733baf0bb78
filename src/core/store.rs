//! core::store
//!
//! Loading and saving locbook documents as JSON.
//!
//! # Format
//!
//! Documents are stored as pretty-printed JSON in the shape described by
//! [`crate::core::model`]. Reads are lenient (missing properties default,
//! unknown properties are ignored); writes always emit every property.
//!
//! # Atomicity
//!
//! [`save`] writes to a sibling temp file, syncs it, and renames it over the
//! destination, so a crash never leaves a half-written document behind.
//!
//! # Example
//!
//! ```no_run
//! use locbook::core::store;
//! use std::path::Path;
//!
//! let mut book = store::load(Path::new("game.locbook")).unwrap();
//! book.keys_locked = true;
//! store::save(Path::new("game.locbook"), &book).unwrap();
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::model::Locbook;

/// Conventional file extension for locbook documents.
pub const EXTENSION: &str = "locbook";

/// Errors from document persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("document already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("failed to read document '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse document '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write document '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    SerializeError(String),
}

/// Load a document from disk.
///
/// # Errors
///
/// - [`StoreError::NotFound`] if the file does not exist
/// - [`StoreError::ReadError`] if it cannot be read
/// - [`StoreError::ParseError`] if it is not a valid document
pub fn load(path: &Path) -> Result<Locbook, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&contents).map_err(|message| StoreError::ParseError {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse a document from JSON text.
///
/// A leading UTF-8 byte order mark is tolerated.
pub fn parse(json: &str) -> Result<Locbook, String> {
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    serde_json::from_str(json).map_err(|e| e.to_string())
}

/// Serialize a document to pretty-printed JSON.
pub fn to_json(book: &Locbook) -> Result<String, StoreError> {
    serde_json::to_string_pretty(book).map_err(|e| StoreError::SerializeError(e.to_string()))
}

/// Save a document atomically.
///
/// Creates parent directories if needed.
pub fn save(path: &Path, book: &Locbook) -> Result<(), StoreError> {
    let contents = to_json(book)?;
    write_atomic(path, contents.as_bytes())
}

/// Create a new, empty document at `path`.
///
/// # Errors
///
/// Returns [`StoreError::AlreadyExists`] rather than overwriting a file.
pub fn create_new(path: &Path) -> Result<Locbook, StoreError> {
    if path.exists() {
        return Err(StoreError::AlreadyExists(path.to_path_buf()));
    }
    let book = Locbook::new();
    save(path, &book)?;
    Ok(book)
}

/// Write bytes to `path` via temp file and rename.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |e: std::io::Error| StoreError::WriteError { path, source: e }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err(path))?;
    }

    let temp_path = temp_path_for(path);
    let mut file = fs::File::create(&temp_path).map_err(write_err(&temp_path))?;
    file.write_all(contents).map_err(write_err(&temp_path))?;
    file.sync_all().map_err(write_err(&temp_path))?;

    fs::rename(&temp_path, path).map_err(write_err(path))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
