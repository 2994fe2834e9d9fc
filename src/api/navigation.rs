use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{RouteGuard, SessionService, TokenService};
use crate::types::dto::navigation::{NavigationRequest, NavigationResponse};

/// Server-side route guard for the client router
pub struct NavigationApi {
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl NavigationApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }
}

#[derive(Tags)]
enum NavigationTags {
    /// Route access decisions
    Navigation,
}

#[OpenApi(prefix_path = "/navigation")]
impl NavigationApi {
    /// Decide whether the caller may open a client route
    ///
    /// Outcomes: `render`, `login_required`, `redirect` (with `redirect_to`),
    /// `role_pending` (with `retry_after_ms`) and `not_found`.
    #[oai(path = "/resolve", method = "post", tag = "NavigationTags::Navigation")]
    async fn resolve(&self, req: &Request, body: Json<NavigationRequest>) -> Result<Json<NavigationResponse>, ApiError> {
        let (ctx, session) = helpers::optional_session(req, &self.token_service, &self.session_service).await?;
        let path = body.0.path;

        let decision = RouteGuard::decide(&path, &session);
        tracing::debug!(request_id = %ctx.request_id, path = %path, decision = ?decision, "Route resolved");

        let required_role = RouteGuard::required_role(&path).flatten();
        Ok(Json(NavigationResponse::new(path, required_role, decision)))
    }
}
