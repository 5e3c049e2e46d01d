//! Tests for salted password hashing.

use rand::SeedableRng;
use rand::rngs::StdRng;

use tictactoe_arena::auth::password::{KEY_LEN, SALT_LEN, derive_hash, generate_salt, verify};

#[test]
fn test_hash_verifies_with_the_right_password() {
    let mut rng = StdRng::seed_from_u64(7);
    let salt = generate_salt(&mut rng);
    let hash = derive_hash("hunter2", &salt);
    assert!(verify("hunter2", &hex::encode(salt), &hash));
}

#[test]
fn test_wrong_password_fails() {
    let mut rng = StdRng::seed_from_u64(7);
    let salt = generate_salt(&mut rng);
    let hash = derive_hash("hunter2", &salt);
    assert!(!verify("hunter3", &hex::encode(salt), &hash));
    assert!(!verify("", &hex::encode(salt), &hash));
}

#[test]
fn test_same_password_different_salts_differ() {
    let mut rng = StdRng::seed_from_u64(7);
    let salt_a = generate_salt(&mut rng);
    let salt_b = generate_salt(&mut rng);
    assert_ne!(salt_a, salt_b);
    assert_ne!(derive_hash("secret", &salt_a), derive_hash("secret", &salt_b));
}

#[test]
fn test_hash_and_salt_lengths() {
    let mut rng = StdRng::seed_from_u64(7);
    let salt = generate_salt(&mut rng);
    assert_eq!(salt.len(), SALT_LEN);
    // Hex doubles the byte length.
    assert_eq!(derive_hash("secret", &salt).len(), KEY_LEN * 2);
}

#[test]
fn test_undecodable_salt_fails_verification() {
    let mut rng = StdRng::seed_from_u64(7);
    let salt = generate_salt(&mut rng);
    let hash = derive_hash("secret", &salt);
    assert!(!verify("secret", "not-hex", &hash));
}

#[test]
fn test_derivation_is_deterministic() {
    let salt = [1u8; SALT_LEN];
    assert_eq!(derive_hash("secret", &salt), derive_hash("secret", &salt));
}
