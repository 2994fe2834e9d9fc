use thiserror::Error;

pub mod authorization;
pub mod credential;
pub mod database;
pub mod resource;
pub mod token;

pub use authorization::AuthorizationError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use resource::ResourceError;
pub use token::TokenError;

/// Internal error type for store and service operations
///
/// Hybrid design separates infrastructure errors (shared) from domain errors (store-specific).
/// Not exposed via API - endpoints must convert to AuthError, AdminError or ApiError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error("Timeout: {operation} did not finish within {after_ms}ms")]
    Timeout {
        operation: String,
        after_ms: u64,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, after_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            after_ms,
        }
    }

    pub fn not_found(resource: &str, id: impl Into<String>) -> Self {
        Self::Resource(ResourceError::NotFound {
            resource: resource.to_string(),
            id: id.into(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Resource(ResourceError::Validation(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Resource(ResourceError::Conflict(message.into()))
    }
}
