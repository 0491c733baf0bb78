//! Integration tests for the persistence layer.
//!
//! These tests exercise the document store and DocumentLock against real
//! files created with tempfile.

use std::fs;

use tempfile::TempDir;

use locbook::core::lock::{DocumentLock, LockError};
use locbook::core::model::Variant;
use locbook::core::store::{self, StoreError};
use locbook::engine;

// =============================================================================
// Test Helpers
// =============================================================================

/// A document as written by the desktop editor, including properties this
/// crate does not model.
const EDITOR_DOCUMENT: &str = r#"{
  "pages": [
    {
      "pageId": "menu",
      "aboutPage": "Main menu",
      "pageFiles": [
        {
          "key": "start",
          "originalValue": "Start",
          "aliases": ["play"],
          "variants": [
            { "language": "en", "_value": "Start" },
            { "language": "fr", "_value": "" }
          ],
          "isSelected": true
        }
      ]
    }
  ],
  "keysLocked": false,
  "lockedLanguages": "ja",
  "encryptedPassword": "c2VjcmV0",
  "windowLayout": { "width": 1200 }
}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn write(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }
}

// =============================================================================
// Store
// =============================================================================

#[test]
fn editor_document_loads_with_defaults() {
    let ws = Workspace::new();
    let path = ws.write("game.locbook", EDITOR_DOCUMENT);

    let book = store::load(&path).unwrap();

    assert_eq!(book.pages.len(), 1);
    assert_eq!(book.pages[0].fields[0].aliases, vec!["play"]);
    assert_eq!(book.locked_languages, "ja");
    assert_eq!(book.encrypted_password, "c2VjcmV0");
    assert!(!book.aliases_locked);
}

#[test]
fn merge_and_save_round_trip() {
    let ws = Workspace::new();
    let target = ws.write("game.locbook", EDITOR_DOCUMENT);
    let source = ws.write(
        "vendor.locbook",
        r#"{ "pages": [{ "pageId": "MENU", "pageFiles": [{
            "key": "play",
            "variants": [{ "language": "fr", "_value": "Jouer" }, { "language": "ja", "_value": "x" }]
        }] }] }"#,
    );

    let _lock = DocumentLock::acquire(&target).unwrap();
    let mut book = store::load(&target).unwrap();
    let incoming = store::load(&source).unwrap();
    let result = engine::merge(&mut book, &incoming, false).unwrap();
    store::save(&target, &book).unwrap();

    assert_eq!(result.variants_updated, 1);
    let reloaded = store::load(&target).unwrap();
    assert_eq!(reloaded, book);
    assert_eq!(
        reloaded.pages[0].fields[0].variants,
        vec![Variant::new("en", "Start"), Variant::new("fr", "Jouer")]
    );
    assert_eq!(reloaded.encrypted_password, "c2VjcmV0");
}

#[test]
fn save_leaves_no_temp_file() {
    let ws = Workspace::new();
    let path = ws.path("out/new.locbook");

    store::save(&path, &locbook::core::model::Locbook::new()).unwrap();

    let names: Vec<String> = fs::read_dir(ws.path("out"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["new.locbook"]);
}

#[test]
fn invalid_json_reports_path() {
    let ws = Workspace::new();
    let path = ws.write("broken.locbook", "{ \"pages\": [ ");

    let err = store::load(&path).unwrap_err();

    assert!(matches!(err, StoreError::ParseError { .. }));
    assert!(err.to_string().contains("broken.locbook"));
}

#[test]
fn create_new_then_load() {
    let ws = Workspace::new();
    let path = ws.path("fresh.locbook");

    let created = store::create_new(&path).unwrap();
    assert_eq!(store::load(&path).unwrap(), created);
    assert!(matches!(
        store::create_new(&path),
        Err(StoreError::AlreadyExists(_))
    ));
}

// =============================================================================
// Locking
// =============================================================================

#[test]
fn lock_blocks_concurrent_writer_until_released() {
    let ws = Workspace::new();
    let path = ws.write("game.locbook", EDITOR_DOCUMENT);

    let mut first = DocumentLock::acquire(&path).unwrap();
    match DocumentLock::acquire(&path) {
        Err(LockError::AlreadyLocked(locked)) => assert_eq!(locked, path),
        other => panic!("expected AlreadyLocked, got {other:?}"),
    }

    first.release().unwrap();
    assert!(DocumentLock::acquire(&path).unwrap().is_held());
}

#[test]
fn lock_file_does_not_disturb_document() {
    let ws = Workspace::new();
    let path = ws.write("game.locbook", EDITOR_DOCUMENT);

    let lock = DocumentLock::acquire(&path).unwrap();

    assert_eq!(lock.path(), ws.path("game.locbook.lock"));
    assert_eq!(fs::read_to_string(&path).unwrap(), EDITOR_DOCUMENT);
}
