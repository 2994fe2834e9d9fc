use std::collections::HashMap;
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::{AuthorizationError, CredentialError};
use crate::services::access;
use crate::stores::{CredentialStore, ProfileStore, RoleStore};
use crate::types::dto::admin::UserWithDetails;
use crate::types::dto::common::to_rfc3339;
use crate::types::internal::{AppRole, SessionState};

/// Result of a role assignment
#[derive(Debug, Clone, PartialEq)]
pub struct RoleAssignment {
    pub user_id: String,
    pub email: String,
    pub role: AppRole,
}

/// Admin service for user listing and role management
///
/// Every operation requires the caller's session to carry the `admin` role.
pub struct AdminService {
    credential_store: Arc<CredentialStore>,
    profile_store: Arc<ProfileStore>,
    role_store: Arc<RoleStore>,
}

impl AdminService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            profile_store: app_data.profile_store.clone(),
            role_store: app_data.role_store.clone(),
        }
    }

    /// Every profile, newest first, joined with its user and role
    ///
    /// Users without a role row are reported as guests; profiles whose user
    /// is gone show the email `"Unknown"`.
    pub async fn get_users(&self, session: &SessionState) -> Result<Vec<UserWithDetails>, InternalError> {
        let admin = access::require_admin(session)?;

        let profiles = self.profile_store.list_newest_first().await?;
        let users: HashMap<String, _> = self
            .credential_store
            .list_users()
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();
        let roles = self.role_store.roles_by_user().await?;

        let details: Vec<UserWithDetails> = profiles
            .into_iter()
            .map(|profile| {
                let user = users.get(&profile.user_id);
                UserWithDetails {
                    role: roles.get(&profile.user_id).copied().unwrap_or(AppRole::Guest),
                    email: user.map(|u| u.email.clone()).unwrap_or_else(|| "Unknown".to_string()),
                    email_confirmed: user.is_some_and(|u| u.email_confirmed_at.is_some()),
                    last_sign_in: user.and_then(|u| u.last_sign_in_at).map(to_rfc3339),
                    created_at: to_rfc3339(profile.created_at),
                    id: profile.id,
                    user_id: profile.user_id,
                    full_name: profile.full_name,
                    phone: profile.phone,
                }
            })
            .collect();

        tracing::debug!(admin_id = %admin.id, count = details.len(), "Listed users");
        Ok(details)
    }

    /// Assign a role to the user with `email`
    ///
    /// Checks, in order: both fields present, role known, user exists,
    /// profile exists, not demoting the last admin. The swap itself is one
    /// transaction.
    pub async fn assign_role_by_email(
        &self,
        session: &SessionState,
        email: &str,
        role: &str,
    ) -> Result<RoleAssignment, InternalError> {
        let admin = access::require_admin(session)?;

        let email = email.trim();
        let role = role.trim();
        if email.is_empty() || role.is_empty() {
            return Err(InternalError::validation("Email and role are required"));
        }
        let role = parse_role(role)?;

        let user = self
            .credential_store
            .find_by_email(email)
            .await?
            .ok_or_else(|| CredentialError::UserNotFound(email.to_string()))?;

        self.swap_role(&admin.id, &user.id, role).await?;

        tracing::info!(admin_id = %admin.id, user_id = %user.id, role = %role, "Role assigned by email");

        Ok(RoleAssignment {
            user_id: user.id,
            email: user.email,
            role,
        })
    }

    /// Set the role of a user by id
    pub async fn set_role_by_user_id(
        &self,
        session: &SessionState,
        user_id: &str,
        role: &str,
    ) -> Result<RoleAssignment, InternalError> {
        let admin = access::require_admin(session)?;
        let role = parse_role(role)?;

        let user = self
            .credential_store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()))?;

        self.swap_role(&admin.id, &user.id, role).await?;

        tracing::info!(admin_id = %admin.id, user_id = %user.id, role = %role, "Role set by user id");

        Ok(RoleAssignment {
            user_id: user.id,
            email: user.email,
            role,
        })
    }

    async fn swap_role(&self, admin_id: &str, target_id: &str, role: AppRole) -> Result<(), InternalError> {
        if self.profile_store.find_by_user_id(target_id).await?.is_none() {
            return Err(AuthorizationError::ProfileNotFound(target_id.to_string()).into());
        }

        // Only self-demotion is guarded
        let protect_last_admin = admin_id == target_id;
        self.role_store.replace_role(target_id, role, protect_last_admin).await
    }
}

fn parse_role(role: &str) -> Result<AppRole, InternalError> {
    role.trim()
        .parse()
        .map_err(|_| InternalError::validation("Invalid role"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ResourceError;
    use crate::test::utils::{create_test_user, insert_raw_user, setup_test_app_data};
    use crate::types::internal::{RoleResolution, SessionUser};
    use crate::types::db::user;

    fn session_for(user: &user::Model, role: Option<AppRole>) -> SessionState {
        SessionState {
            user: Some(SessionUser::from(user.clone())),
            profile: None,
            role,
            role_resolution: Some(RoleResolution::Assigned),
            retry_after_ms: None,
        }
    }

    fn validation_message(result: Result<RoleAssignment, InternalError>) -> String {
        match result {
            Err(InternalError::Resource(ResourceError::Validation(message))) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_admin_is_rejected() {
        let app_data = setup_test_app_data(&[]).await;
        let staff = create_test_user(&app_data.db, "staff@example.com", AppRole::Staff).await;
        let service = AdminService::new(app_data);
        let session = session_for(&staff, Some(AppRole::Staff));

        assert!(matches!(
            service.get_users(&session).await,
            Err(InternalError::Authorization(AuthorizationError::AdminRequired))
        ));
        assert!(matches!(
            service.assign_role_by_email(&session, "staff@example.com", "admin").await,
            Err(InternalError::Authorization(AuthorizationError::AdminRequired))
        ));
    }

    #[tokio::test]
    async fn test_get_users_joins_and_defaults() {
        let app_data = setup_test_app_data(&[]).await;
        let admin = create_test_user(&app_data.db, "admin@example.com", AppRole::Admin).await;
        create_test_user(&app_data.db, "guest@example.com", AppRole::Guest).await;
        let service = AdminService::new(app_data);

        let users = service.get_users(&session_for(&admin, Some(AppRole::Admin))).await.unwrap();

        assert_eq!(users.len(), 2);
        let admin_row = users.iter().find(|u| u.email == "admin@example.com").unwrap();
        assert_eq!(admin_row.role, AppRole::Admin);
        assert!(!admin_row.email_confirmed);
        assert_eq!(admin_row.full_name.as_deref(), Some("Test User"));
    }

    #[tokio::test]
    async fn test_assign_role_validation_order() {
        let app_data = setup_test_app_data(&[]).await;
        let admin = create_test_user(&app_data.db, "admin@example.com", AppRole::Admin).await;
        insert_raw_user(&app_data.db, "no-profile", "bare@example.com").await;
        let service = AdminService::new(app_data);
        let session = session_for(&admin, Some(AppRole::Admin));

        assert_eq!(
            validation_message(service.assign_role_by_email(&session, "", "staff").await),
            "Email and role are required"
        );
        assert_eq!(
            validation_message(service.assign_role_by_email(&session, "nobody@example.com", "owner").await),
            "Invalid role"
        );
        assert!(matches!(
            service.assign_role_by_email(&session, "nobody@example.com", "staff").await,
            Err(InternalError::Credential(CredentialError::UserNotFound(_)))
        ));
        assert!(matches!(
            service.assign_role_by_email(&session, "bare@example.com", "staff").await,
            Err(InternalError::Authorization(AuthorizationError::ProfileNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_assign_role_swaps_single_row() {
        let app_data = setup_test_app_data(&[]).await;
        let admin = create_test_user(&app_data.db, "admin@example.com", AppRole::Admin).await;
        let guest = create_test_user(&app_data.db, "guest@example.com", AppRole::Guest).await;
        let service = AdminService::new(app_data.clone());

        let assignment = service
            .assign_role_by_email(&session_for(&admin, Some(AppRole::Admin)), " guest@example.com ", "staff")
            .await
            .unwrap();

        assert_eq!(assignment.user_id, guest.id);
        assert_eq!(assignment.role, AppRole::Staff);
        assert_eq!(app_data.role_store.get_role(&guest.id).await.unwrap(), Some(AppRole::Staff));
        assert_eq!(app_data.role_store.roles_by_user().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_last_admin_cannot_demote_self() {
        let app_data = setup_test_app_data(&[]).await;
        let admin = create_test_user(&app_data.db, "admin@example.com", AppRole::Admin).await;
        let service = AdminService::new(app_data.clone());
        let session = session_for(&admin, Some(AppRole::Admin));

        assert!(matches!(
            service.set_role_by_user_id(&session, &admin.id, "guest").await,
            Err(InternalError::Authorization(AuthorizationError::LastAdminDemotion))
        ));

        // With a second admin the demotion goes through
        create_test_user(&app_data.db, "admin2@example.com", AppRole::Admin).await;
        service.set_role_by_user_id(&session, &admin.id, "guest").await.unwrap();
        assert_eq!(app_data.role_store.get_role(&admin.id).await.unwrap(), Some(AppRole::Guest));
    }

    #[tokio::test]
    async fn test_set_role_rejects_unknown_role() {
        let app_data = setup_test_app_data(&[]).await;
        let admin = create_test_user(&app_data.db, "admin@example.com", AppRole::Admin).await;
        let guest = create_test_user(&app_data.db, "guest@example.com", AppRole::Guest).await;
        let service = AdminService::new(app_data.clone());

        assert_eq!(
            validation_message(
                service
                    .set_role_by_user_id(&session_for(&admin, Some(AppRole::Admin)), &guest.id, "owner")
                    .await
            ),
            "Invalid role"
        );
        assert_eq!(app_data.role_store.get_role(&guest.id).await.unwrap(), Some(AppRole::Guest));
    }

    #[tokio::test]
    async fn test_set_role_unknown_user() {
        let app_data = setup_test_app_data(&[]).await;
        let admin = create_test_user(&app_data.db, "admin@example.com", AppRole::Admin).await;
        let service = AdminService::new(app_data);

        assert!(matches!(
            service
                .set_role_by_user_id(&session_for(&admin, Some(AppRole::Admin)), "ghost", "staff")
                .await,
            Err(InternalError::Credential(CredentialError::UserNotFound(_)))
        ));
    }
}
