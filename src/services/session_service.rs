use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::stores::{CredentialStore, ProfileStore, RoleStore};
use crate::types::db::profile;
use crate::types::dto::profile::UpdateProfileRequest;
use crate::types::internal::{AppRole, RoleResolution, SessionState, SessionUser};

/// Resolves who the caller is: user, profile and role
///
/// The role is read from `user_roles` on every call, so role changes apply
/// to the very next request.
pub struct SessionService {
    credential_store: Arc<CredentialStore>,
    profile_store: Arc<ProfileStore>,
    role_store: Arc<RoleStore>,
    role_fetch_timeout: Duration,
}

impl SessionService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            profile_store: app_data.profile_store.clone(),
            role_store: app_data.role_store.clone(),
            role_fetch_timeout: app_data.settings.role_fetch_timeout(),
        }
    }

    /// Build the session snapshot for an authenticated user id
    ///
    /// A token whose user no longer exists yields an anonymous session.
    /// Profile failures are logged and reported as "no profile". Role
    /// failures fall back to guest; a stalled role lookup yields no role
    /// with `TimedOut` and a retry hint.
    pub async fn bootstrap(&self, user_id: &str) -> Result<SessionState, InternalError> {
        let user = match self.credential_store.find_by_id(user_id).await? {
            Some(user) => user,
            None => {
                tracing::warn!(user_id = %user_id, "Session token refers to an unknown user");
                return Ok(SessionState::anonymous());
            }
        };

        let profile = match self.profile_store.find_by_user_id(user_id).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "No profile found for user");
                None
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Profile lookup failed");
                None
            }
        };

        let (role, role_resolution) =
            resolve_role(self.role_store.get_role(user_id), self.role_fetch_timeout, user_id).await;

        let retry_after_ms = (role_resolution == RoleResolution::TimedOut).then(|| self.retry_after_ms());

        Ok(SessionState {
            user: Some(SessionUser::from(user)),
            profile,
            role,
            role_resolution: Some(role_resolution),
            retry_after_ms,
        })
    }

    /// Session for an optional user id; `None` is anonymous
    pub async fn bootstrap_optional(&self, user_id: Option<&str>) -> Result<SessionState, InternalError> {
        match user_id {
            Some(user_id) => self.bootstrap(user_id).await,
            None => Ok(SessionState::anonymous()),
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<profile::Model, InternalError> {
        self.profile_store
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AuthorizationError::ProfileNotFound(user_id.to_string()).into())
    }

    /// Apply a partial profile update and return the merged profile
    pub async fn update_profile(
        &self,
        user_id: &str,
        patch: UpdateProfileRequest,
    ) -> Result<profile::Model, InternalError> {
        let updated = self.profile_store.update(user_id, patch).await?;
        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(updated)
    }

    fn retry_after_ms(&self) -> u64 {
        self.role_fetch_timeout.as_millis() as u64
    }
}

/// Bound a role lookup by `limit`
///
/// Found row → `Assigned`; missing row or failure → guest with
/// `DefaultedToGuest`; no answer in time → no role with `TimedOut`.
pub(crate) async fn resolve_role<F>(
    fetch: F,
    limit: Duration,
    user_id: &str,
) -> (Option<AppRole>, RoleResolution)
where
    F: Future<Output = Result<Option<AppRole>, InternalError>>,
{
    match tokio::time::timeout(limit, fetch).await {
        Ok(Ok(Some(role))) => (Some(role), RoleResolution::Assigned),
        Ok(Ok(None)) => {
            tracing::warn!(user_id = %user_id, "No role row for user, defaulting to guest");
            (Some(AppRole::Guest), RoleResolution::DefaultedToGuest)
        }
        Ok(Err(e)) => {
            tracing::error!(user_id = %user_id, error = %e, "Role lookup failed, defaulting to guest");
            (Some(AppRole::Guest), RoleResolution::DefaultedToGuest)
        }
        Err(_) => {
            let err = InternalError::timeout("role_fetch", limit.as_millis() as u64);
            tracing::warn!(user_id = %user_id, error = %err, "Role lookup timed out");
            (None, RoleResolution::TimedOut)
        }
    }
}
