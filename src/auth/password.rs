//! Password hashing.
//!
//! Thin wrapper over bcrypt so the rest of the crate never touches the raw
//! primitive. Verification is fail-closed: a digest bcrypt cannot parse is a
//! mismatch, never an error the caller could misread as success.

use anyhow::{Context, Result};
use bcrypt::DEFAULT_COST;

/// Hash a plaintext password with a per-call random salt.
pub fn hash_password(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, DEFAULT_COST).context("Failed to hash password")
}

/// Check a plaintext password against a stored digest.
///
/// Returns `false` for malformed digests.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}
