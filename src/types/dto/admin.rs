use poem_openapi::Object;

use crate::types::internal::AppRole;

/// One row of the `get-users` listing
#[derive(Object, Debug, Clone)]
pub struct UserWithDetails {
    /// Profile ID
    pub id: String,
    pub user_id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// ISO 8601
    pub created_at: String,
    /// `"Unknown"` when the auth user is gone
    pub email: String,
    /// Defaults to `guest` when no role row exists
    pub role: AppRole,
    pub email_confirmed: bool,
    /// ISO 8601
    pub last_sign_in: Option<String>,
}

/// Response body of `get-users`
#[derive(Object, Debug)]
pub struct GetUsersResponse {
    pub users: Vec<UserWithDetails>,
}

/// Request body of `assign-role`
///
/// Both fields are plain strings so that empty and unknown values reach the
/// handler and get the function's own error messages.
#[derive(Object, Debug, Default)]
pub struct AssignRoleRequest {
    #[oai(default)]
    pub email: String,
    #[oai(default)]
    pub role: String,
}

/// Response after assigning a role
#[derive(Object, Debug)]
pub struct AssignRoleResponse {
    /// Whether the operation was successful
    pub success: bool,

    /// Human-readable message describing the result
    pub message: String,

    /// ID of the user whose role changed
    pub user_id: String,
}

/// Request body for setting a role by user ID
#[derive(Object, Debug)]
pub struct SetRoleRequest {
    /// `admin`, `staff` or `guest`
    pub role: String,
}
