use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::AdminError;
use crate::services::{AdminService, SessionService, TokenService};
use crate::types::dto::admin::{AssignRoleResponse, SetRoleRequest};

/// Role management by user ID, used by the user management page
pub struct AdminApi {
    admin_service: Arc<AdminService>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl AdminApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            admin_service: Arc::new(AdminService::new(app_data.clone())),
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Admin role management
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Set a user's role
    ///
    /// Replaces the user's role row in one transaction. An admin cannot
    /// demote themself while they are the only admin.
    #[oai(path = "/users/:user_id/role", method = "put", tag = "AdminTags::Admin")]
    async fn set_role(
        &self,
        req: &Request,
        user_id: Path<String>,
        body: Json<SetRoleRequest>,
    ) -> Result<Json<AssignRoleResponse>, AdminError> {
        let (_ctx, session) = helpers::require_session(req, &self.token_service, &self.session_service).await?;

        let assignment = self
            .admin_service
            .set_role_by_user_id(&session, &user_id.0, &body.role)
            .await?;

        Ok(Json(AssignRoleResponse {
            success: true,
            message: format!("Role {} assigned to {}", assignment.role, assignment.email),
            user_id: assignment.user_id,
        }))
    }
}
