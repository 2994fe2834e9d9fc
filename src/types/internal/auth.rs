use serde::{Deserialize, Serialize};

/// JWT Claims structure
///
/// Carries no role. The role is read from `user_roles` on every request, so
/// a role change applies to tokens already issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID, used to correlate log lines for one token
    pub jti: String,
}
