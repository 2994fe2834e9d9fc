// API-facing error types
pub mod admin;
pub mod auth;
pub mod resource;

// Re-exports for convenience
pub use admin::AdminError;
pub use auth::AuthError;
pub use resource::ApiError;

use poem_openapi::payload::Json;

use crate::types::dto::common::ErrorResponse;

pub(crate) fn error_body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}
