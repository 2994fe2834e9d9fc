use crate::errors::api::error_body;
use crate::errors::internal::{AuthorizationError, InternalError, ResourceError, TokenError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Errors for the back-office and guest CRUD endpoints
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "resource_bad_request")]
pub enum ApiError {
    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Signed in, but the role or ownership check failed
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Row does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Input rejected
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Uniqueness or capacity conflict
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

// Unparseable payloads and parameters get the JSON error body too
fn resource_bad_request(err: poem::Error) -> ApiError {
    ApiError::bad_request(err.to_string())
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(error_body("unauthorized", message, 401))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(error_body("forbidden", message, 403))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(error_body("not_found", message, 404))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(error_body("bad_request", message, 400))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(error_body("conflict", message, 409))
    }

    fn internal_server_error() -> Self {
        ApiError::InternalError(error_body("internal_error", "An internal error occurred", 500))
    }

    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Token(TokenError::MissingAuthHeader) => Self::unauthorized("Missing authorization header"),
            InternalError::Token(TokenError::Invalid(_)) | InternalError::Token(TokenError::Expired) => {
                Self::unauthorized("Invalid or expired token")
            }
            InternalError::Authorization(AuthorizationError::NoSession) => Self::unauthorized("No user logged in"),
            InternalError::Authorization(AuthorizationError::AdminRequired) => {
                Self::forbidden("Unauthorized - Admin access required")
            }
            InternalError::Authorization(AuthorizationError::RoleRequired { .. }) => {
                Self::forbidden("Insufficient role for this operation")
            }
            // Hide the existence of other users' rows
            InternalError::Authorization(AuthorizationError::NotOwner { resource, id, .. }) => {
                Self::not_found(format!("{} not found: {}", resource, id))
            }

            InternalError::Authorization(AuthorizationError::ProfileNotFound(_)) => {
                Self::not_found("User profile not found")
            }

            InternalError::Resource(ResourceError::NotFound { .. }) => Self::not_found(err.to_string()),
            InternalError::Resource(ResourceError::Validation(message)) => Self::bad_request(message.clone()),
            InternalError::Resource(ResourceError::Conflict(message)) => Self::conflict(message.clone()),

            _ => {
                tracing::error!("Unexpected error in resource operation: {}", err);
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
            ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::BadRequest(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
