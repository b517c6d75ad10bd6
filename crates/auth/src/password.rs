//! Password hashing (Argon2id, PHC string encoding).

use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use brewtab_core::DomainError;

/// Hash a plaintext password into a salted PHC string.
pub fn hash(plain: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::store(format!("password hashing: {e}")))
}

/// Verify a plaintext password against a stored PHC string.
///
/// Unparseable stored hashes verify as false rather than erroring; the
/// caller cannot distinguish them from a wrong password.
pub fn verify(plain: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };

    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hashed = hash("s3cret").expect("hashing failed");
        assert!(verify("s3cret", &hashed));
        assert!(!verify("wrong", &hashed));
    }

    #[test]
    fn garbage_stored_hash_never_verifies() {
        assert!(!verify("s3cret", "not-a-phc-string"));
    }
}
