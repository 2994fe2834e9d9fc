use crate::types::internal::{AppRole, GuardDecision, SessionState};

/// Client routes and the role each one requires. `None` is public.
const ROUTES: &[(&str, Option<AppRole>)] = &[
    ("/", None),
    ("/auth", None),
    ("/admin", Some(AppRole::Admin)),
    ("/admin/dashboard", Some(AppRole::Admin)),
    ("/admin/rooms", Some(AppRole::Admin)),
    ("/admin/restaurant", Some(AppRole::Admin)),
    ("/admin/users", Some(AppRole::Admin)),
    ("/admin/setup", Some(AppRole::Admin)),
    ("/guest", Some(AppRole::Guest)),
];

/// Decides what the client router should do for a path and a session
pub struct RouteGuard;

impl RouteGuard {
    /// Look up a path. `None` means the route does not exist;
    /// `Some(None)` means it is public.
    pub fn required_role(path: &str) -> Option<Option<AppRole>> {
        let path = Self::normalize(path);
        ROUTES
            .iter()
            .find(|(route, _)| *route == path)
            .map(|(_, role)| *role)
    }

    pub fn decide(path: &str, session: &SessionState) -> GuardDecision {
        let required = match Self::required_role(path) {
            Some(required) => required,
            None => return GuardDecision::NotFound,
        };

        let Some(required) = required else {
            return GuardDecision::Render;
        };

        if !session.is_authenticated() {
            return GuardDecision::LoginRequired;
        }

        if session.role_pending() {
            return GuardDecision::RolePending {
                retry_after_ms: session.retry_after_ms.unwrap_or_default(),
            };
        }

        if session.has_role(required) {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect {
                to: Self::home_for(session.role).to_string(),
            }
        }
    }

    /// Where a user lands when sent away from a page they cannot see
    pub fn home_for(role: Option<AppRole>) -> &'static str {
        match role {
            Some(AppRole::Admin) => "/admin/dashboard",
            Some(AppRole::Guest) => "/guest",
            _ => "/",
        }
    }

    // "/admin/" and "/admin" are the same route; the query string is ignored
    fn normalize(path: &str) -> &str {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        }
    }
}
