use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::prelude::*;
use std::fmt;
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::TokenError;
use crate::services::crypto;
use crate::types::internal::Claims;

/// Access tokens live 15 minutes
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;

/// Manages JWT token generation and validation
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
    refresh_expiration_days: i64,
    refresh_token_secret: String,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret and refresh token secret
    pub fn new(jwt_secret: String, refresh_token_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes: ACCESS_TOKEN_TTL_SECONDS / 60,
            refresh_expiration_days: 7,
            refresh_token_secret,
        }
    }

    /// Generate a JWT for the given user_id
    pub fn generate_jwt(&self, user_id: &str) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let expiration = now + (self.jwt_expiration_minutes * 60);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| TokenError::Generation(e.to_string()).into())
    }

    /// Validate a JWT and return the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })?;

        Ok(token_data.claims)
    }

    /// Generate a cryptographically secure refresh token
    ///
    /// 32 random bytes, base64-encoded
    pub fn generate_refresh_token(&self) -> String {
        let mut rng = rand::rng();
        let random_bytes: [u8; 32] = rng.random();
        general_purpose::STANDARD.encode(random_bytes)
    }

    /// Hash a refresh token using HMAC-SHA256 (hex)
    pub fn hash_refresh_token(&self, token: &str) -> Result<String, InternalError> {
        crypto::hmac_sha256_token(&self.refresh_token_secret, token)
    }

    /// Unix timestamp 7 days from now
    pub fn get_refresh_expiration(&self) -> i64 {
        let now = Utc::now().timestamp();
        now + (self.refresh_expiration_days * 24 * 60 * 60)
    }

    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.jwt_expiration_minutes * 60
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("refresh_expiration_days", &self.refresh_expiration_days)
            .field("refresh_token_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenService {{ jwt_expiration: {}min, refresh_expiration: {}days }}",
            self.jwt_expiration_minutes, self.refresh_expiration_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
    const REFRESH_SECRET: &str = "test-refresh-secret-minimum-32-chars";

    fn token_service() -> TokenService {
        TokenService::new(JWT_SECRET.to_string(), REFRESH_SECRET.to_string())
    }

    fn decode_without_exp(token: &str) -> Claims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        decode::<Claims>(token, &DecodingKey::from_secret(JWT_SECRET.as_bytes()), &validation)
            .unwrap()
            .claims
    }

    #[test]
    fn test_jwt_contains_user_id_and_15_minute_expiry() {
        let user_id = Uuid::new_v4().to_string();

        let token = token_service().generate_jwt(&user_id).unwrap();
        let claims = decode_without_exp(&token);

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_jwt_ids_are_unique() {
        let service = token_service();

        let first = decode_without_exp(&service.generate_jwt("user-1").unwrap());
        let second = decode_without_exp(&service.generate_jwt("user-1").unwrap());

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_validate_jwt_returns_correct_claims() {
        let service = token_service();
        let token = service.generate_jwt("user-42").unwrap();

        let claims = service.validate_jwt(&token).unwrap();

        assert_eq!(claims.sub, "user-42");
    }

    #[test]
    fn test_validate_jwt_fails_with_invalid_signature() {
        let other = TokenService::new(
            "wrong-secret-key-minimum-32-characters".to_string(),
            REFRESH_SECRET.to_string(),
        );
        let token = token_service().generate_jwt("user-1").unwrap();

        match other.validate_jwt(&token) {
            Err(InternalError::Token(TokenError::Invalid(_))) => {}
            other => panic!("Expected invalid token error, got: {:?}", other),
        }
    }

    #[test]
    fn test_validate_jwt_fails_with_garbage() {
        assert!(matches!(
            token_service().validate_jwt("not.a.jwt"),
            Err(InternalError::Token(TokenError::Invalid(_)))
        ));
    }

    #[test]
    fn test_validate_jwt_fails_with_expired_jwt() {
        let now = Utc::now().timestamp();
        let expired_claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 3600,
            iat: now - 7200,
            jti: Uuid::new_v4().to_string(),
        };
        let expired_token = encode(
            &Header::new(Algorithm::HS256),
            &expired_claims,
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .unwrap();

        match token_service().validate_jwt(&expired_token) {
            Err(InternalError::Token(TokenError::Expired)) => {}
            other => panic!("Expected expired token error, got: {:?}", other),
        }
    }

    #[test]
    fn test_generate_refresh_token_creates_unique_tokens() {
        let service = token_service();

        let token1 = service.generate_refresh_token();
        let token2 = service.generate_refresh_token();

        assert_ne!(token1, token2);
        // 32 bytes base64-encoded
        assert_eq!(token1.len(), 44);
    }

    #[test]
    fn test_hash_refresh_token_is_keyed() {
        let other = TokenService::new(JWT_SECRET.to_string(), "another-refresh-secret-32-characters".to_string());

        let hash1 = token_service().hash_refresh_token("token").unwrap();
        let hash2 = token_service().hash_refresh_token("token").unwrap();
        let hash3 = other.hash_refresh_token("token").unwrap();

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_refresh_expiration_is_seven_days_out() {
        let now = Utc::now().timestamp();
        let expires_at = token_service().get_refresh_expiration();

        assert!(expires_at - now >= 7 * 24 * 3600 - 1);
        assert!(expires_at - now <= 7 * 24 * 3600 + 1);
    }

    #[test]
    fn test_debug_does_not_expose_secrets() {
        let debug_output = format!("{:?}", token_service());

        assert!(!debug_output.contains(JWT_SECRET));
        assert!(!debug_output.contains(REFRESH_SECRET));
    }
}
