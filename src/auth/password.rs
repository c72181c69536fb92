/**
 * Password Hashing and Acceptance Policy
 *
 * This module owns everything password-shaped: the bcrypt hash/verify
 * pair and the acceptance policy enforced at registration, before any
 * hashing happens.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt at `DEFAULT_COST`
 * - Hashes are salted, so the same plaintext never hashes identically
 * - Verification is constant-time (via bcrypt)
 * - Plaintext passwords are never logged
 */

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// The fixed set of symbols accepted by the password policy.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Hash a plaintext password with bcrypt
///
/// Each call salts independently: hashing the same plaintext twice
/// yields different strings, both of which verify.
pub fn hash_password(plaintext: &str) -> Result<String, BcryptError> {
    hash(plaintext, DEFAULT_COST)
}

/// Verify a plaintext password against a stored bcrypt hash
///
/// Returns `Ok(false)` on a mismatch; errors only when the stored hash
/// itself is malformed.
pub fn verify_password(plaintext: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(plaintext, password_hash)
}

/// Check a candidate password against the acceptance policy
///
/// Rules: at least 8 characters, at least one digit, one uppercase
/// letter, one lowercase letter, and one symbol from the fixed set
/// `!@#$%^&*(),.?":{}|<>`.
///
/// # Returns
///
/// `Ok(())` if the password is acceptable, otherwise one message per
/// violated rule, in policy order, for a field-level validation error.
pub fn validate_password(plaintext: &str) -> Result<(), Vec<String>> {
    let mut failures = Vec::new();

    if plaintext.chars().count() < 8 {
        failures.push("Password must be at least 8 characters long.".to_string());
    }
    if !plaintext.chars().any(|c| c.is_ascii_digit()) {
        failures.push("Password must include at least one number.".to_string());
    }
    if !plaintext.chars().any(|c| c.is_ascii_uppercase()) {
        failures.push("Password must include at least one uppercase letter.".to_string());
    }
    if !plaintext.chars().any(|c| c.is_ascii_lowercase()) {
        failures.push("Password must include at least one lowercase letter.".to_string());
    }
    if !plaintext.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        failures.push("Password must include at least one special character.".to_string());
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}
