use thiserror::Error;

/// Errors from the CRUD stores
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),
}
