//! Tests for database repository operations.

use tempfile::NamedTempFile;

use tictactoe_arena::db::{ArenaRepository, NewMatchRecord, NewUser};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, ArenaRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = ArenaRepository::new(db_path);
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

fn sample_match(series_id: &str, game_number: i32) -> NewMatchRecord {
    NewMatchRecord::new(
        "Alice".to_string(),
        "Bob".to_string(),
        "Alice".to_string(),
        "win".to_string(),
        "4,0,1,8,2".to_string(),
        "X".to_string(),
        "pvp".to_string(),
        series_id.to_string(),
        game_number,
        3,
        2,
    )
}

#[test]
fn test_create_user() {
    let (_db, repo) = setup_test_db();
    let user = repo
        .create_user(NewUser::new(
            "Alice".to_string(),
            "hash".to_string(),
            "salt".to_string(),
        ))
        .expect("Create failed");
    assert_eq!(user.username(), "Alice");
    assert!(*user.id() > 0);
}

#[test]
fn test_create_user_duplicate_name_fails() {
    let (_db, repo) = setup_test_db();
    let new_user = NewUser::new("Bob".to_string(), "hash".to_string(), "salt".to_string());
    repo.create_user(new_user.clone()).expect("First create failed");
    let result = repo.create_user(new_user);
    assert!(result.is_err(), "Duplicate name should fail");
}

#[test]
fn test_get_user_by_name() {
    let (_db, repo) = setup_test_db();
    repo.create_user(NewUser::new(
        "Carol".to_string(),
        "hash".to_string(),
        "salt".to_string(),
    ))
    .expect("Create failed");

    let found = repo.get_user_by_name("Carol").expect("Query failed");
    assert_eq!(found.expect("User missing").username(), "Carol");

    let missing = repo.get_user_by_name("NoSuchUser").expect("Query failed");
    assert!(missing.is_none());
}

#[test]
fn test_insert_match_returns_row() {
    let (_db, repo) = setup_test_db();
    let saved = repo
        .insert_match(sample_match("20260829_101500_1234", 1))
        .expect("Insert failed");
    assert!(*saved.id() > 0);
    assert_eq!(saved.player_one(), "Alice");
    assert_eq!(saved.winner(), "Alice");
    assert_eq!(saved.moves(), "4,0,1,8,2");
    assert_eq!(*saved.game_number(), 1);
}

#[test]
fn test_matches_for_player_covers_both_columns() {
    let (_db, repo) = setup_test_db();
    repo.insert_match(sample_match("s1", 1)).expect("Insert failed");

    let as_player_two = NewMatchRecord::new(
        "Carol".to_string(),
        "Alice".to_string(),
        "Carol".to_string(),
        "win".to_string(),
        "0,4,1,5,2".to_string(),
        "X".to_string(),
        "pvp".to_string(),
        "s2".to_string(),
        1,
        3,
        2,
    );
    repo.insert_match(as_player_two).expect("Insert failed");

    let history = repo.matches_for_player("Alice").expect("Query failed");
    assert_eq!(history.len(), 2);

    let none = repo.matches_for_player("Mallory").expect("Query failed");
    assert!(none.is_empty());
}

#[test]
fn test_match_by_id() {
    let (_db, repo) = setup_test_db();
    let saved = repo
        .insert_match(sample_match("s1", 1))
        .expect("Insert failed");
    let found = repo.match_by_id(*saved.id()).expect("Query failed");
    assert_eq!(*found.expect("Match missing").id(), *saved.id());

    let missing = repo.match_by_id(99999).expect("Query failed");
    assert!(missing.is_none());
}

#[test]
fn test_series_games_come_back_in_play_order() {
    let (_db, repo) = setup_test_db();
    // Insert out of order; the query sorts by game number.
    repo.insert_match(sample_match("s1", 2)).expect("Insert failed");
    repo.insert_match(sample_match("s1", 1)).expect("Insert failed");
    repo.insert_match(sample_match("s1", 3)).expect("Insert failed");
    repo.insert_match(sample_match("other", 1))
        .expect("Insert failed");

    let games = repo.series_games("s1").expect("Query failed");
    let numbers: Vec<i32> = games.iter().map(|g| *g.game_number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_delete_user_removes_their_matches() {
    let (_db, repo) = setup_test_db();
    repo.create_user(NewUser::new(
        "Alice".to_string(),
        "hash".to_string(),
        "salt".to_string(),
    ))
    .expect("Create failed");
    repo.insert_match(sample_match("s1", 1)).expect("Insert failed");
    repo.insert_match(sample_match("s1", 2)).expect("Insert failed");

    repo.delete_user_and_matches("Alice").expect("Delete failed");

    assert!(
        repo.get_user_by_name("Alice")
            .expect("Query failed")
            .is_none()
    );
    assert!(
        repo.matches_for_player("Alice")
            .expect("Query failed")
            .is_empty()
    );
    // Bob appeared only opposite Alice, so those rows are gone too.
    assert!(
        repo.matches_for_player("Bob")
            .expect("Query failed")
            .is_empty()
    );
}
