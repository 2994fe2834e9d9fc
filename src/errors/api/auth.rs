use crate::errors::api::error_body;
use crate::errors::internal::{AuthorizationError, CredentialError, InternalError, TokenError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Authentication error types
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "auth_bad_request")]
pub enum AuthError {
    /// Invalid email or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Email already registered
    #[oai(status = 400)]
    DuplicateEmail(Json<ErrorResponse>),

    /// Sign-up input rejected
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Authorization header is missing
    #[oai(status = 401)]
    MissingAuthHeader(Json<ErrorResponse>),

    /// Invalid refresh token
    #[oai(status = 401)]
    InvalidRefreshToken(Json<ErrorResponse>),

    /// Refresh token has expired
    #[oai(status = 401)]
    ExpiredRefreshToken(Json<ErrorResponse>),

    /// Operation needs a signed-in user
    #[oai(status = 401)]
    NoSession(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

// Unparseable payloads and parameters get the JSON error body too
fn auth_bad_request(err: poem::Error) -> AuthError {
    AuthError::validation_failed(err.to_string())
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(error_body("invalid_credentials", "Invalid login credentials", 401))
    }

    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(error_body("duplicate_email", "User already registered", 400))
    }

    pub fn validation_failed(reason: impl Into<String>) -> Self {
        AuthError::ValidationFailed(error_body("validation_failed", reason, 400))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(error_body("invalid_token", "Invalid or malformed JWT", 401))
    }

    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(error_body("expired_token", "JWT has expired", 401))
    }

    pub fn missing_auth_header() -> Self {
        AuthError::MissingAuthHeader(error_body("missing_auth_header", "Authorization header is required", 401))
    }

    pub fn invalid_refresh_token() -> Self {
        AuthError::InvalidRefreshToken(error_body("invalid_refresh_token", "Invalid refresh token", 401))
    }

    pub fn expired_refresh_token() -> Self {
        AuthError::ExpiredRefreshToken(error_body("expired_refresh_token", "Refresh token has expired", 401))
    }

    pub fn no_session() -> Self {
        AuthError::NoSession(error_body("no_session", "No user logged in", 401))
    }

    fn internal_server_error() -> Self {
        AuthError::InternalError(error_body("internal_error", "An internal error occurred", 500))
    }

    /// Convert InternalError to AuthError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Credential(CredentialError::InvalidCredentials) => Self::invalid_credentials(),
            // Unknown users look exactly like bad passwords
            InternalError::Credential(CredentialError::UserNotFound(_)) => Self::invalid_credentials(),
            InternalError::Credential(CredentialError::DuplicateEmail(_)) => Self::duplicate_email(),
            InternalError::Credential(CredentialError::PasswordValidationFailed(reason)) => {
                Self::validation_failed(reason.clone())
            }
            InternalError::Credential(CredentialError::InvalidEmail(email)) => {
                Self::validation_failed(format!("Invalid email address: {}", email))
            }
            InternalError::Credential(CredentialError::InvalidRefreshToken) => Self::invalid_refresh_token(),
            InternalError::Credential(CredentialError::ExpiredRefreshToken) => Self::expired_refresh_token(),

            InternalError::Token(TokenError::MissingAuthHeader) => Self::missing_auth_header(),
            InternalError::Token(TokenError::Invalid(reason)) => {
                tracing::debug!("Rejected bearer token: {}", reason);
                Self::invalid_token()
            }
            InternalError::Token(TokenError::Expired) => Self::expired_token(),

            InternalError::Authorization(AuthorizationError::NoSession) => Self::no_session(),

            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }

    fn body(&self) -> &ErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::DuplicateEmail(json)
            | AuthError::ValidationFailed(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::MissingAuthHeader(json)
            | AuthError::InvalidRefreshToken(json)
            | AuthError::ExpiredRefreshToken(json)
            | AuthError::NoSession(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
