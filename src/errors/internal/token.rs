use thiserror::Error;

/// Bearer token failures, shared by every authenticated endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token generation failed: {0}")]
    Generation(String),
}
