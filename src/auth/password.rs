//! Salted password hashing.
//!
//! PBKDF2-HMAC-SHA256 with 10 000 iterations, a 32-byte derived key, and
//! a 16-byte random salt. Salt and hash are stored hex-encoded.

use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha2::Sha256;

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 10_000;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Generates a random salt.
pub fn generate_salt(rng: &mut impl Rng) -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt[..]);
    salt
}

/// Derives the hex-encoded password hash for the given salt.
pub fn derive_hash(password: &str, salt: &[u8]) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut key);
    hex::encode(key)
}

/// Checks a password attempt against a stored hex salt and hash.
///
/// An undecodable salt fails verification rather than erroring.
pub fn verify(password: &str, salt_hex: &str, stored_hash: &str) -> bool {
    match hex::decode(salt_hex) {
        Ok(salt) => derive_hash(password, &salt) == stored_hash,
        Err(_) => false,
    }
}
