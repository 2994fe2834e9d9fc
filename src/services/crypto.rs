use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 for refresh tokens and return as hexadecimal string
pub fn hmac_sha256_token(key: &str, token: &str) -> Result<String, InternalError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| InternalError::crypto("hmac_init", e.to_string()))?;
    mac.update(token.as_bytes());
    let result = mac.finalize();
    Ok(format!("{:x}", result.into_bytes()))
}

fn peppered_argon2(pepper: &str) -> Result<Argon2<'_>, InternalError> {
    Argon2::new_with_secret(
        pepper.as_bytes(),
        Algorithm::Argon2id,
        Version::V0x13,
        Params::default(),
    )
    .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
}

/// Hash a password with Argon2id, using the pepper as the secret parameter
pub fn hash_password(pepper: &str, password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = peppered_argon2(pepper)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::PasswordHashingFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash
///
/// A malformed stored hash is an error; a wrong password is `Ok(false)`.
pub fn verify_password(pepper: &str, password: &str, stored_hash: &str) -> Result<bool, InternalError> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| InternalError::parse("password_hash", e.to_string()))?;
    Ok(peppered_argon2(pepper)?
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a cryptographically secure random password
///
/// 20 characters drawn from upper and lower case letters, digits and symbols.
pub fn generate_secure_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEPPER: &str = "test-pepper-16chars";

    #[test]
    fn test_hmac_is_deterministic_per_key() {
        let a = hmac_sha256_token("key-one", "token").unwrap();
        let b = hmac_sha256_token("key-one", "token").unwrap();
        let c = hmac_sha256_token("key-two", "token").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_hash_password_produces_argon2id_phc() {
        let hash = hash_password(PEPPER, "correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
    }

    #[test]
    fn test_verify_password_accepts_correct_and_rejects_wrong() {
        let hash = hash_password(PEPPER, "correct horse").unwrap();

        assert!(verify_password(PEPPER, "correct horse", &hash).unwrap());
        assert!(!verify_password(PEPPER, "battery staple", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_fails_with_other_pepper() {
        let hash = hash_password(PEPPER, "correct horse").unwrap();

        assert!(!verify_password("another-pepper-16ch", "correct horse", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_rejects_malformed_hash() {
        assert!(verify_password(PEPPER, "pw", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_generate_secure_password_length_and_charset() {
        let password = generate_secure_password();

        assert_eq!(password.len(), 20);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)));
        assert_ne!(password, generate_secure_password());
    }
}
