//! Password hashing and credential checks
//!
//! Passwords are stored as a random per-user salt plus an iterated SHA-256
//! digest of `salt || password`, both hex encoded. Session tokens are random
//! 32-byte values, also hex encoded.
//!
//! This module has no HTTP framework dependencies; the web crate wraps it
//! with cookie handling and middleware.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::{Error, Result};

/// Maximum username length
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Minimum password length accepted by `create-user`
pub const PASSWORD_MIN_LENGTH: usize = 8;

const SALT_BYTES: usize = 16;
const SESSION_TOKEN_BYTES: usize = 32;
const HASH_ROUNDS: u32 = 10_000;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn random_hex(len: usize) -> String {
    let mut buf = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut buf);
    to_hex(&buf)
}

/// Generate a fresh hex-encoded salt
pub fn generate_salt() -> String {
    random_hex(SALT_BYTES)
}

/// Generate a session token for the `recipebox_session` cookie
pub fn generate_session_token() -> String {
    random_hex(SESSION_TOKEN_BYTES)
}

/// Hash a password with the given salt
///
/// # Examples
/// ```
/// use recipebox_common::auth::hash_password;
///
/// let hash = hash_password("correct horse", "00ff");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, hash_password("correct horse", "00ff"));
/// assert_ne!(hash, hash_password("correct horse", "ff00"));
/// ```
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut digest = {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hasher.finalize()
    };

    for _ in 1..HASH_ROUNDS {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(digest);
        digest = hasher.finalize();
    }

    format!("{:x}", digest)
}

/// Check a password against a stored salt and hash in constant time
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let calculated = hash_password(password, salt);
    // slices of different lengths compare unequal
    calculated.as_bytes().ct_eq(expected_hash.as_bytes()).into()
}

/// Validate a username before it is stored
pub fn validate_username(username: &str) -> Result<()> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("username is required".to_string()));
    }
    if trimmed != username {
        return Err(Error::InvalidInput(
            "username must not start or end with whitespace".to_string(),
        ));
    }
    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(Error::InvalidInput(format!(
            "username must be at most {} characters",
            USERNAME_MAX_LENGTH
        )));
    }
    Ok(())
}

/// Validate a new password
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(Error::InvalidInput(format!(
            "password must be at least {} characters",
            PASSWORD_MIN_LENGTH
        )));
    }
    Ok(())
}
