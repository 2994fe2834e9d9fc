use poem_openapi::{Enum, Object};

use crate::types::dto::common::to_rfc3339;
use crate::types::dto::profile::Profile;
use crate::types::internal::{AppRole, GuardDecision, RoleResolution, SessionState, SessionUser};

/// Authenticated user as seen by the client
#[derive(Object, Debug, Clone)]
pub struct SessionUserResponse {
    pub id: String,
    pub email: String,
    pub email_confirmed: bool,
    /// ISO 8601, absent until the first sign-in
    pub last_sign_in: Option<String>,
}

impl From<SessionUser> for SessionUserResponse {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            email_confirmed: user.email_confirmed,
            last_sign_in: user.last_sign_in_at.map(to_rfc3339),
        }
    }
}

/// Session snapshot: user, profile, role and derived role flags
#[derive(Object, Debug, Clone)]
pub struct SessionResponse {
    pub user: Option<SessionUserResponse>,
    pub profile: Option<Profile>,
    pub role: Option<AppRole>,
    pub role_resolution: Option<RoleResolution>,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_guest: bool,
    /// Present when the role lookup timed out and the client should retry
    pub retry_after_ms: Option<u64>,
}

impl From<SessionState> for SessionResponse {
    fn from(session: SessionState) -> Self {
        let is_admin = session.is_admin();
        let is_staff = session.is_staff();
        let is_guest = session.is_guest();
        Self {
            user: session.user.map(Into::into),
            profile: session.profile.map(Into::into),
            role: session.role,
            role_resolution: session.role_resolution,
            is_admin,
            is_staff,
            is_guest,
            retry_after_ms: session.retry_after_ms,
        }
    }
}

/// Client route to check
#[derive(Object, Debug)]
pub struct NavigationRequest {
    /// Router path, e.g. `/admin/rooms`
    pub path: String,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[oai(rename_all = "snake_case")]
pub enum NavigationOutcome {
    Render,
    LoginRequired,
    Redirect,
    RolePending,
    NotFound,
}

/// What the client should do with the requested route
#[derive(Object, Debug)]
pub struct NavigationResponse {
    pub path: String,
    pub outcome: NavigationOutcome,
    /// Target for `redirect`
    pub redirect_to: Option<String>,
    /// Delay before retrying for `role_pending`
    pub retry_after_ms: Option<u64>,
    /// Role the route requires, if any
    pub required_role: Option<AppRole>,
}

impl NavigationResponse {
    pub fn new(path: String, required_role: Option<AppRole>, decision: GuardDecision) -> Self {
        let (outcome, redirect_to, retry_after_ms) = match decision {
            GuardDecision::Render => (NavigationOutcome::Render, None, None),
            GuardDecision::LoginRequired => (NavigationOutcome::LoginRequired, None, None),
            GuardDecision::Redirect { to } => (NavigationOutcome::Redirect, Some(to), None),
            GuardDecision::RolePending { retry_after_ms } => {
                (NavigationOutcome::RolePending, None, Some(retry_after_ms))
            }
            GuardDecision::NotFound => (NavigationOutcome::NotFound, None, None),
        };
        Self {
            path,
            outcome,
            redirect_to,
            retry_after_ms,
            required_role,
        }
    }
}
