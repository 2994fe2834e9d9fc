use crate::errors::api::error_body;
use crate::errors::internal::{
    AuthorizationError, CredentialError, InternalError, ResourceError, TokenError,
};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Errors for the admin functions (`get-users`, `assign-role`) and user role management
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "admin_bad_request")]
pub enum AdminError {
    /// Authorization header is missing
    #[oai(status = 401)]
    MissingAuthHeader(Json<ErrorResponse>),

    /// Bearer token rejected
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// Requester is not an admin
    #[oai(status = 403)]
    AdminRequired(Json<ErrorResponse>),

    /// Request body rejected
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Target user not found
    #[oai(status = 404)]
    UserNotFound(Json<ErrorResponse>),

    /// Target user has no profile
    #[oai(status = 404)]
    ProfileNotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

// Unparseable payloads and parameters get the JSON error body too
fn admin_bad_request(err: poem::Error) -> AdminError {
    AdminError::bad_request(err.to_string())
}

impl AdminError {
    pub fn missing_auth_header() -> Self {
        AdminError::MissingAuthHeader(error_body("missing_auth_header", "Missing authorization header", 401))
    }

    pub fn invalid_token() -> Self {
        AdminError::InvalidToken(error_body("invalid_token", "Invalid or expired token", 401))
    }

    pub fn admin_required() -> Self {
        AdminError::AdminRequired(error_body("admin_required", "Unauthorized - Admin access required", 403))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AdminError::BadRequest(error_body("bad_request", message, 400))
    }

    pub fn user_not_found() -> Self {
        AdminError::UserNotFound(error_body("user_not_found", "User not found with this email", 404))
    }

    pub fn profile_not_found() -> Self {
        AdminError::ProfileNotFound(error_body("profile_not_found", "User profile not found", 404))
    }

    fn internal_server_error() -> Self {
        AdminError::InternalError(error_body("internal_error", "An internal error occurred", 500))
    }

    /// Convert InternalError to AdminError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Token(TokenError::MissingAuthHeader) => Self::missing_auth_header(),
            InternalError::Token(TokenError::Invalid(_)) | InternalError::Token(TokenError::Expired) => {
                Self::invalid_token()
            }

            // Token was valid but names no existing user
            InternalError::Authorization(AuthorizationError::NoSession) => Self::invalid_token(),

            InternalError::Authorization(AuthorizationError::AdminRequired)
            | InternalError::Authorization(AuthorizationError::RoleRequired { .. }) => Self::admin_required(),
            InternalError::Authorization(AuthorizationError::LastAdminDemotion) => {
                Self::bad_request("Cannot demote the last admin")
            }
            InternalError::Authorization(AuthorizationError::ProfileNotFound(_)) => Self::profile_not_found(),

            InternalError::Credential(CredentialError::UserNotFound(_)) => Self::user_not_found(),
            InternalError::Resource(ResourceError::Validation(message)) => Self::bad_request(message.clone()),

            _ => {
                tracing::error!("Unexpected error in admin operation: {}", err);
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
            AdminError::MissingAuthHeader(json)
            | AdminError::InvalidToken(json)
            | AdminError::AdminRequired(json)
            | AdminError::BadRequest(json)
            | AdminError::UserNotFound(json)
            | AdminError::ProfileNotFound(json)
            | AdminError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for AdminError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
