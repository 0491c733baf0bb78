//! core::lock
//!
//! Exclusive lock on a locbook document.
//!
//! # Architecture
//!
//! The merge and import engines mutate their target in place and are not
//! safe to run twice against the same document at once. Within a process the
//! `&mut` borrow already rules that out; across processes the CLI holds a
//! `DocumentLock` on the document it is about to rewrite.
//!
//! # Storage
//!
//! - `<document>.lock` - Lock file with OS-level exclusive lock
//!
//! # Invariants
//!
//! - Lock must be held from load until the rewritten document is saved
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)
//!
//! # Example
//!
//! ```no_run
//! use locbook::core::lock::DocumentLock;
//! use std::path::Path;
//!
//! let lock = DocumentLock::acquire(Path::new("game.locbook")).unwrap();
//! assert!(lock.is_held());
//!
//! // Load, merge, save ...
//!
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("document '{0}' is locked by another process")]
    AlreadyLocked(PathBuf),

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

/// An exclusive lock on one document.
///
/// The lock is automatically released when this guard is dropped.
#[derive(Debug)]
pub struct DocumentLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    file: Option<File>,
}

impl DocumentLock {
    /// Attempt to lock `document`.
    ///
    /// The document itself need not exist yet. The lock file is created next
    /// to it, along with any missing parent directories.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(document: &Path) -> Result<Self, LockError> {
        let path = Self::lock_path_for(document);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LockError::CreateFailed(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                Err(LockError::AlreadyLocked(document.to_path_buf()))
            }
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    /// Lock file location for a document.
    pub fn lock_path_for(document: &Path) -> PathBuf {
        let mut name = document
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        document.with_file_name(name)
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock before the guard goes out of scope.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            file.unlock()
                .map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        // Best-effort release on drop
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_succeeds() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("book.locbook");

        let lock = DocumentLock::acquire(&doc).expect("acquire lock");
        assert!(lock.is_held());
        assert!(lock.path().exists());
        assert_eq!(lock.path(), temp.path().join("book.locbook.lock"));
    }

    #[test]
    fn prevents_second_acquire() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("book.locbook");

        let _lock = DocumentLock::acquire(&doc).expect("first acquire");
        let result = DocumentLock::acquire(&doc);
        assert!(matches!(result, Err(LockError::AlreadyLocked(_))));
    }

    #[test]
    fn released_on_drop() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("book.locbook");

        {
            let lock = DocumentLock::acquire(&doc).expect("first acquire");
            assert!(lock.is_held());
        }

        let lock = DocumentLock::acquire(&doc).expect("second acquire");
        assert!(lock.is_held());
    }

    #[test]
    fn released_explicitly() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("book.locbook");

        let mut lock = DocumentLock::acquire(&doc).expect("acquire");
        lock.release().expect("release");
        assert!(!lock.is_held());

        let again = DocumentLock::acquire(&doc).expect("reacquire");
        assert!(again.is_held());
    }

    #[test]
    fn independent_documents_lock_independently() {
        let temp = TempDir::new().unwrap();

        let _a = DocumentLock::acquire(&temp.path().join("a.locbook")).unwrap();
        let b = DocumentLock::acquire(&temp.path().join("b.locbook")).unwrap();
        assert!(b.is_held());
    }

    #[test]
    fn creates_missing_parent() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("sub/book.locbook");

        let lock = DocumentLock::acquire(&doc).unwrap();
        assert!(lock.path().exists());
    }
}
