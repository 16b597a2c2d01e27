// ABOUTME: Tests for the session store backends and the typed session view
// ABOUTME: Memory and JSON file stores, login artifact lifecycle and persistence across instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{default_endpoints, init_test_logging, sample_claims, ScriptedProvider, APP_URL};
use fitness_client::auth::{AuthController, AuthStatus, MemoryAddressBar};
use fitness_client::constants::session_keys;
use fitness_client::errors::StorageError;
use fitness_client::session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

fn exercise_store(store: &dyn SessionStore) {
    assert_eq!(store.get("missing").unwrap(), None);

    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.set("a", "3").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));

    let mut keys = store.keys().unwrap();
    keys.sort();
    assert_eq!(keys, vec!["a".to_owned(), "b".to_owned()]);

    store.remove("a").unwrap();
    store.remove("a").unwrap();
    assert_eq!(store.get("a").unwrap(), None);

    store.clear().unwrap();
    assert!(store.keys().unwrap().is_empty());
}

// =============================================================================
// Backends
// =============================================================================

#[test]
fn test_memory_store_contract() {
    exercise_store(&MemorySessionStore::new());
}

#[test]
fn test_file_store_contract() {
    let dir = TempDir::new().unwrap();
    exercise_store(&FileSessionStore::new(dir.path().join("session.json")));
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("session.json");

    FileSessionStore::new(&path).set("state", "abc").unwrap();

    let reopened = FileSessionStore::new(&path);
    assert_eq!(reopened.get("state").unwrap().as_deref(), Some("abc"));
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn test_file_store_missing_or_empty_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    assert!(FileSessionStore::new(&path).keys().unwrap().is_empty());

    std::fs::write(&path, "  \n").unwrap();
    assert!(FileSessionStore::new(&path).keys().unwrap().is_empty());
}

#[test]
fn test_file_store_corrupt_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = FileSessionStore::new(&path).get("state").unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn test_file_store_clear_discards_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = FileSessionStore::new(&path);

    store.clear().unwrap();
    assert!(!path.exists());
    store.clear().unwrap();

    store.set(session_keys::STATE, "fresh").unwrap();
    assert_eq!(store.get(session_keys::STATE).unwrap().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_corrupt_session_file_does_not_block_login() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&path));
    let mut controller = AuthController::new(
        default_endpoints(),
        Arc::new(ScriptedProvider::new()),
        store.clone(),
        Arc::new(MemoryAddressBar::new(Url::parse(APP_URL).unwrap())),
    );

    let state = controller.initialize().await;
    assert!(state.error.is_some());
    assert!(!state.is_authenticated);
    assert!(!path.exists());

    controller.login().unwrap();
    assert!(store.get(session_keys::CODE_VERIFIER).unwrap().is_some());

    std::fs::write(&path, "{not json").unwrap();
    controller.logout();
    assert!(!path.exists());
    assert_eq!(controller.status(), AuthStatus::Anonymous);
    assert!(controller.login().is_ok());
}

#[cfg(unix)]
fn mode_of(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

#[cfg(unix)]
#[test]
fn test_file_store_is_owner_only() {
    let dir = TempDir::new().unwrap();
    let session_dir = dir.path().join("fitness-client");
    let path = session_dir.join("session.json");
    FileSessionStore::new(&path).set("access_token", "secret").unwrap();

    assert_eq!(mode_of(&session_dir), 0o700);
    assert_eq!(mode_of(&path), 0o600);
    assert!(!session_dir.join("session.json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn test_file_store_tightens_loose_session_dir() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let session_dir = dir.path().join("fitness-client");
    std::fs::create_dir(&session_dir).unwrap();
    std::fs::set_permissions(&session_dir, std::fs::Permissions::from_mode(0o755)).unwrap();

    FileSessionStore::new(session_dir.join("session.json"))
        .set("access_token", "secret")
        .unwrap();

    assert_eq!(mode_of(&session_dir), 0o700);
}

#[cfg(unix)]
#[test]
fn test_file_store_leaves_chosen_parent_alone() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let parent = dir.path().join("shared");
    std::fs::create_dir(&parent).unwrap();
    std::fs::set_permissions(&parent, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = parent.join("session.json");
    FileSessionStore::new(&path).set("access_token", "secret").unwrap();

    assert_eq!(mode_of(&parent), 0o755);
    assert_eq!(mode_of(&path), 0o600);
}

// =============================================================================
// Typed session view
// =============================================================================

#[test]
fn test_session_login_lifecycle() {
    let session = Session::new(Arc::new(MemorySessionStore::new()));

    session.begin_login("verifier", "state").unwrap();
    assert_eq!(session.code_verifier().unwrap().as_deref(), Some("verifier"));
    assert_eq!(session.state().unwrap().as_deref(), Some("state"));

    session.store_tokens("access", Some("refresh")).unwrap();
    session.store_user(&sample_claims()).unwrap();
    session.finish_login().unwrap();

    assert!(session.code_verifier().unwrap().is_none());
    assert!(session.state().unwrap().is_none());
    assert_eq!(session.access_token().unwrap().as_deref(), Some("access"));
    assert_eq!(session.refresh_token().unwrap().as_deref(), Some("refresh"));
    assert_eq!(session.user().unwrap(), Some(sample_claims()));

    session.clear().unwrap();
    for key in session_keys::ALL {
        assert!(session.store().get(key).unwrap().is_none(), "{key} left behind");
    }
}

#[test]
fn test_store_tokens_without_refresh_drops_old_refresh() {
    let session = Session::new(Arc::new(MemorySessionStore::new()));
    session.store_tokens("a1", Some("r1")).unwrap();
    session.store_tokens("a2", None).unwrap();

    assert_eq!(session.access_token().unwrap().as_deref(), Some("a2"));
    assert!(session.refresh_token().unwrap().is_none());
}

#[test]
fn test_unparsable_user_reads_as_absent() {
    let store = Arc::new(MemorySessionStore::new());
    store.set(session_keys::USER, "{broken").unwrap();

    let session = Session::new(store);
    assert_eq!(session.user().unwrap(), None);
}
