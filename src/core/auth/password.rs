//! Password hashing with Argon2id

use crate::domain::{ClinidataError, DomainError, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Rejects passwords shorter than [`MIN_PASSWORD_LEN`]
pub fn check_strength(password: &str) -> std::result::Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::SenhaFraca {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Hashes a password into a PHC string (`$argon2id$v=19$...`)
///
/// # Errors
///
/// Returns a domain error for weak passwords.
pub fn hash_password(password: &str) -> Result<String> {
    check_strength(password)?;
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ClinidataError::Other(format!("Failed to hash password: {e}")))
}

/// Checks a password against a stored PHC string
///
/// A stored hash that does not parse never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("segredo123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("segredo123", &hash));
        assert!(!verify_password("segredo124", &hash));
    }

    #[test]
    fn test_salt_is_random() {
        assert_ne!(
            hash_password("segredo123").unwrap(),
            hash_password("segredo123").unwrap()
        );
    }

    #[test]
    fn test_weak_password() {
        let result = hash_password("curta");
        assert!(matches!(
            result,
            Err(ClinidataError::Domain(DomainError::SenhaFraca { min: 8 }))
        ));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("segredo123", "not-a-phc-string"));
    }
}
