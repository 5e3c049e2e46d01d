//! Tests for registration, login, and account deletion.

use tempfile::NamedTempFile;

use tictactoe_arena::db::ArenaRepository;
use tictactoe_arena::{AuthError, AuthService};

fn setup() -> (NamedTempFile, AuthService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = ArenaRepository::new(db_path);
    repo.run_migrations().expect("Migrations failed");
    (db_file, AuthService::new(repo))
}

#[test]
fn test_register_then_login() {
    let (_db, auth) = setup();
    let registered = auth.register("alice", "hunter2").expect("Register failed");
    assert_eq!(registered.username(), "alice");

    let user = auth.login("alice", "hunter2").expect("Login failed");
    assert_eq!(user.username(), "alice");
}

#[test]
fn test_register_stores_a_salted_hash() {
    let (_db, auth) = setup();
    let user = auth.register("alice", "hunter2").expect("Register failed");
    assert_ne!(user.password_hash(), "hunter2");
    assert!(!user.salt().is_empty());

    // Same password, different account, different salt and hash.
    let other = auth.register("bob", "hunter2").expect("Register failed");
    assert_ne!(user.salt(), other.salt());
    assert_ne!(user.password_hash(), other.password_hash());
}

#[test]
fn test_register_rejects_blank_credentials() {
    let (_db, auth) = setup();
    assert!(matches!(
        auth.register("", "password"),
        Err(AuthError::EmptyCredentials)
    ));
    assert!(matches!(
        auth.register("alice", ""),
        Err(AuthError::EmptyCredentials)
    ));
    assert!(matches!(
        auth.register("   ", "password"),
        Err(AuthError::EmptyCredentials)
    ));
}

#[test]
fn test_register_rejects_taken_username() {
    let (_db, auth) = setup();
    auth.register("alice", "first").expect("Register failed");
    assert!(matches!(
        auth.register("alice", "second"),
        Err(AuthError::UsernameTaken)
    ));
}

#[test]
fn test_login_rejects_wrong_password() {
    let (_db, auth) = setup();
    auth.register("alice", "hunter2").expect("Register failed");
    assert!(matches!(
        auth.login("alice", "hunter3"),
        Err(AuthError::InvalidCredentials)
    ));
}

#[test]
fn test_login_rejects_unknown_user_with_the_same_error() {
    let (_db, auth) = setup();
    assert!(matches!(
        auth.login("nobody", "password"),
        Err(AuthError::InvalidCredentials)
    ));
}

#[test]
fn test_delete_account_removes_the_user() {
    let (_db, auth) = setup();
    auth.register("alice", "hunter2").expect("Register failed");
    auth.delete_account("alice").expect("Delete failed");
    assert!(matches!(
        auth.login("alice", "hunter2"),
        Err(AuthError::InvalidCredentials)
    ));
}
