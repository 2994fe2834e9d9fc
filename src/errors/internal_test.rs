#[cfg(test)]
mod tests {
    use crate::errors::internal::{
        AuthorizationError, CredentialError, DatabaseError, InternalError, ResourceError, TokenError,
    };
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("create_user", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("create_user"));
        assert!(error_string.contains("Database error"));
    }

    #[test]
    fn test_parse_error_includes_value_type() {
        let error = InternalError::parse("AppRole", "unknown role: owner");

        let error_string = error.to_string();
        assert!(error_string.contains("AppRole"));
        assert!(error_string.contains("unknown role: owner"));
        assert!(error_string.contains("Parse error"));
    }

    #[test]
    fn test_crypto_error_includes_operation() {
        let error = InternalError::crypto("argon2_init", "invalid secret length");

        let error_string = error.to_string();
        assert!(error_string.contains("argon2_init"));
        assert!(error_string.contains("Crypto error"));
    }

    #[test]
    fn test_timeout_error_includes_duration() {
        let error = InternalError::timeout("role_fetch", 5000);

        assert_eq!(error.to_string(), "Timeout: role_fetch did not finish within 5000ms");
    }

    #[test]
    fn test_credential_error_messages() {
        assert_eq!(CredentialError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(
            CredentialError::UserNotFound("user-123".to_string()).to_string(),
            "User not found: user-123"
        );
        assert_eq!(
            CredentialError::PasswordHashingFailed("hash error".to_string()).to_string(),
            "Password hashing failed: hash error"
        );
    }

    #[test]
    fn test_authorization_error_messages() {
        assert_eq!(AuthorizationError::NoSession.to_string(), "No user logged in");
        assert_eq!(
            AuthorizationError::LastAdminDemotion.to_string(),
            "Cannot demote the last admin"
        );
    }

    #[test]
    fn test_resource_not_found_message() {
        let error = InternalError::not_found("menu item", "m-1");

        assert_eq!(error.to_string(), "menu item not found: m-1");
        assert!(matches!(error, InternalError::Resource(ResourceError::NotFound { .. })));
    }

    #[test]
    fn test_token_error_auto_converts_to_internal_error() {
        let internal_error: InternalError = TokenError::Expired.into();

        assert!(matches!(internal_error, InternalError::Token(TokenError::Expired)));
    }

    #[test]
    fn test_unique_violation_detected_from_message() {
        let error = DatabaseError::Operation {
            operation: "insert_room".to_string(),
            source: DbErr::Custom("UNIQUE constraint failed: rooms.room_number".to_string()),
        };

        assert!(error.is_unique_violation());
    }

    #[test]
    fn test_other_database_errors_are_not_unique_violations() {
        let error = DatabaseError::Operation {
            operation: "insert_room".to_string(),
            source: DbErr::RecordNotFound("rooms".to_string()),
        };

        assert!(!error.is_unique_violation());
    }
}
