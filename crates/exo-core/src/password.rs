//! Argon2id hashing for stored secrets.
//!
//! Used for user passwords, OTP codes, and backup codes — everything that
//! must never be stored in the clear. Hashes are PHC strings, so parameters
//! and salt travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a secret into a PHC string with a fresh random salt.
pub fn hash_secret(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("argon2 hash failed: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a secret against a stored PHC string.
///
/// Malformed stored hashes verify as `false` rather than erroring — a
/// corrupt hash must never authenticate.
pub fn verify_secret(plain: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}
