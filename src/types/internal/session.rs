use poem_openapi::Enum;

use crate::types::db::{profile, user};
use crate::types::internal::AppRole;

/// How the role in a session snapshot was obtained
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[oai(rename_all = "snake_case")]
pub enum RoleResolution {
    /// A `user_roles` row exists
    Assigned,
    /// Row missing or lookup failed; guest assumed
    DefaultedToGuest,
    /// Lookup did not finish in time; role unknown
    TimedOut,
}

/// Identity half of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub email_confirmed: bool,
    pub last_sign_in_at: Option<i64>,
}

impl From<user::Model> for SessionUser {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            email_confirmed: model.email_confirmed_at.is_some(),
            last_sign_in_at: model.last_sign_in_at,
        }
    }
}

/// Who is calling, their profile and their role
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub profile: Option<profile::Model>,
    pub role: Option<AppRole>,
    pub role_resolution: Option<RoleResolution>,
    /// Set only when the role lookup timed out
    pub retry_after_ms: Option<u64>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Exact match. Admin does not imply staff.
    pub fn has_role(&self, role: AppRole) -> bool {
        self.role == Some(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(AppRole::Admin)
    }

    pub fn is_staff(&self) -> bool {
        self.has_role(AppRole::Staff)
    }

    pub fn is_guest(&self) -> bool {
        self.has_role(AppRole::Guest)
    }

    pub fn role_pending(&self) -> bool {
        self.role_resolution == Some(RoleResolution::TimedOut)
    }
}

/// Outcome of guarding a client route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    LoginRequired,
    Redirect { to: String },
    RolePending { retry_after_ms: u64 },
    NotFound,
}
