use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::services::TokenService;
use crate::stores::CredentialStore;
use crate::types::db::user;
use crate::types::internal::RequestContext;

/// Issued on a successful login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service that orchestrates signup, login, logout and token refresh
pub struct AuthService {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            token_service: app_data.token_service.clone(),
        }
    }

    /// Register a guest account (user, profile and guest role)
    pub async fn signup(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<user::Model, InternalError> {
        let user = self.credential_store.add_user(email, password, full_name).await?;

        tracing::info!(request_id = %ctx.request_id, user_id = %user.id, "Signup completed");
        Ok(user)
    }

    /// Verify credentials and issue an access/refresh token pair
    ///
    /// 1. Verify email and password
    /// 2. Generate JWT
    /// 3. Generate and store the refresh token hash
    /// 4. Stamp last sign-in
    pub async fn login(&self, ctx: &RequestContext, email: &str, password: &str) -> Result<TokenPair, InternalError> {
        let user = match self.credential_store.verify_credentials(email, password).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(request_id = %ctx.request_id, ip = ?ctx.ip_address, "Login failed: {}", e);
                return Err(e);
            }
        };

        let access_token = self.token_service.generate_jwt(&user.id)?;

        let refresh_token = self.token_service.generate_refresh_token();
        let token_hash = self.token_service.hash_refresh_token(&refresh_token)?;
        let expires_at = self.token_service.get_refresh_expiration();
        self.credential_store
            .store_refresh_token(token_hash, user.id.clone(), expires_at)
            .await?;

        self.credential_store.record_sign_in(&user.id).await?;

        tracing::info!(request_id = %ctx.request_id, user_id = %user.id, "Login succeeded");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, ctx: &RequestContext, refresh_token: &str) -> Result<String, InternalError> {
        let token_hash = self.token_service.hash_refresh_token(refresh_token)?;
        let user_id = self.credential_store.validate_refresh_token(&token_hash).await?;

        let access_token = self.token_service.generate_jwt(&user_id)?;

        tracing::debug!(request_id = %ctx.request_id, user_id = %user_id, "Access token refreshed");
        Ok(access_token)
    }

    /// Revoke the caller's refresh token
    ///
    /// Tokens that are unknown or belong to someone else are left alone; the
    /// call still succeeds.
    pub async fn logout(&self, ctx: &RequestContext, refresh_token: &str) -> Result<(), InternalError> {
        let Some(user_id) = ctx.user_id() else {
            return Err(AuthorizationError::NoSession.into());
        };

        let token_hash = self.token_service.hash_refresh_token(refresh_token)?;
        let revoked = self.credential_store.revoke_refresh_token(&token_hash, user_id).await?;

        if revoked {
            tracing::info!(request_id = %ctx.request_id, user_id = %user_id, "Logout revoked refresh token");
        } else {
            tracing::warn!(request_id = %ctx.request_id, user_id = %user_id, "Logout with unknown refresh token");
        }
        Ok(())
    }
}
