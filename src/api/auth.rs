use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::AuthError;
use crate::services::{AuthService, SessionService, TokenService};
use crate::types::dto::auth::{
    LoginRequest, LogoutRequest, LogoutResponse, RefreshRequest, RefreshResponse, SignupRequest, SignupResponse,
    TokenResponse,
};
use crate::types::dto::navigation::SessionResponse;

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(app_data.clone())),
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Create an account
    ///
    /// The account gets a profile and the `guest` role.
    #[oai(path = "/signup", method = "post", tag = "AuthTags::Authentication")]
    async fn signup(&self, req: &Request, body: Json<SignupRequest>) -> Result<Json<SignupResponse>, AuthError> {
        let ctx = helpers::optional_auth(req, &self.token_service);
        let body = body.0;

        let user = self
            .auth_service
            .signup(&ctx, &body.email, &body.password, body.full_name)
            .await?;

        Ok(Json(SignupResponse {
            user_id: user.id,
            email: user.email,
            message: "Account created successfully".to_string(),
        }))
    }

    /// Authenticate with email and password
    ///
    /// Returns an access token (JWT) and refresh token for subsequent API requests.
    /// Access tokens expire after 15 minutes.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let ctx = helpers::optional_auth(req, &self.token_service);

        let tokens = self.auth_service.login(&ctx, &body.email, &body.password).await?;

        Ok(Json(TokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.access_token_ttl_seconds(),
        }))
    }

    /// Obtain a new access token
    ///
    /// Use your refresh token to get a new access token when the current one expires.
    #[oai(path = "/refresh", method = "post", tag = "AuthTags::Authentication")]
    async fn refresh(&self, req: &Request, body: Json<RefreshRequest>) -> Result<Json<RefreshResponse>, AuthError> {
        let ctx = helpers::optional_auth(req, &self.token_service);

        let access_token = self.auth_service.refresh(&ctx, &body.refresh_token).await?;

        Ok(Json(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.access_token_ttl_seconds(),
        }))
    }

    /// Revoke a refresh token
    ///
    /// Only a token belonging to the caller is revoked.
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, req: &Request, body: Json<LogoutRequest>) -> Result<Json<LogoutResponse>, AuthError> {
        let ctx = helpers::require_auth(req, &self.token_service)?;

        self.auth_service.logout(&ctx, &body.refresh_token).await?;

        Ok(Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }))
    }

    /// Current session
    ///
    /// User, profile and role of the caller. Without a usable bearer token
    /// the session is anonymous. When the role lookup stalls, `role` is
    /// absent and `retry_after_ms` tells the client when to ask again.
    #[oai(path = "/session", method = "get", tag = "AuthTags::Authentication")]
    async fn session(&self, req: &Request) -> Result<Json<SessionResponse>, AuthError> {
        let (_ctx, session) = helpers::optional_session(req, &self.token_service, &self.session_service).await?;

        Ok(Json(session.into()))
    }
}
