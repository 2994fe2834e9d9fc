use thiserror::Error;

use crate::types::internal::AppRole;

#[derive(Error, Debug)]
pub enum AuthorizationError {
    /// No session for an operation that needs one
    #[error("No user logged in")]
    NoSession,

    #[error("Admin access required")]
    AdminRequired,

    #[error("One of roles {required:?} required, user has {actual:?}")]
    RoleRequired {
        required: Vec<AppRole>,
        actual: Option<AppRole>,
    },

    /// Row exists but belongs to someone else
    #[error("User {user_id} does not own {resource} {id}")]
    NotOwner {
        user_id: String,
        resource: String,
        id: String,
    },

    #[error("Cannot demote the last admin")]
    LastAdminDemotion,

    #[error("User profile not found: {0}")]
    ProfileNotFound(String),
}
