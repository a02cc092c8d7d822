//! Sign-in against the bundled fixture accounts

#![allow(clippy::unwrap_used)]

use gymadmin_auth::{AuthContext, FileStore, MemoryStore, TOKEN_KEY, USER_KEY, UserDirectory};
use gymadmin_core::{Error, Role};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures() -> UserDirectory {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/users.json");
    UserDirectory::load(&path).unwrap()
}

#[test]
fn test_bundled_admin_can_sign_in() {
    let auth = AuthContext::new(fixtures(), MemoryStore::new());

    let user = auth.login("admin@example.com", "admin123").unwrap();

    assert_eq!(user.role, Role::Admin);
    assert!(auth.is_authenticated());
    let (name, value) = auth.auth_header().unwrap();
    assert_eq!(name, "Authorization");
    assert!(value.starts_with("Bearer "));
}

#[test]
fn test_bundled_member_is_refused() {
    let auth = AuthContext::new(fixtures(), MemoryStore::new());
    assert!(matches!(
        auth.login("mia@example.com", "member123"),
        Err(Error::Unauthorized)
    ));
}

#[test]
fn test_session_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".gym-admin").join("session.json");

    let first = AuthContext::new(fixtures(), FileStore::new(&path));
    first.login("desk@example.com", "desk1234").unwrap();

    let second = AuthContext::new(fixtures(), FileStore::new(&path));
    assert_eq!(second.current_user().unwrap().email, "desk@example.com");
    assert_eq!(first.token(), second.token());

    second.logout().unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains(USER_KEY));
    assert!(!text.contains(TOKEN_KEY));
    assert!(!first.is_authenticated());
}

#[test]
fn test_missing_fixture_file() {
    let err = UserDirectory::load(std::path::Path::new("/nonexistent/users.json")).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}
