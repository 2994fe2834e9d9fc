use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::AdminError;
use crate::services::{AdminService, SessionService, TokenService};
use crate::types::dto::admin::{AssignRoleRequest, AssignRoleResponse, GetUsersResponse};

/// Admin functions: user listing and role assignment by email
///
/// Both require a bearer token whose user holds the `admin` role.
pub struct FunctionsApi {
    admin_service: Arc<AdminService>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl FunctionsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            admin_service: Arc::new(AdminService::new(app_data.clone())),
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }
}

#[derive(Tags)]
enum FunctionTags {
    /// Admin functions
    Functions,
}

#[OpenApi(prefix_path = "/functions/v1")]
impl FunctionsApi {
    /// List every user with profile, email and role
    #[oai(path = "/get-users", method = "get", tag = "FunctionTags::Functions")]
    async fn get_users(&self, req: &Request) -> Result<Json<GetUsersResponse>, AdminError> {
        let (_ctx, session) = helpers::require_session(req, &self.token_service, &self.session_service).await?;

        let users = self.admin_service.get_users(&session).await?;
        Ok(Json(GetUsersResponse { users }))
    }

    /// Assign a role to the user with the given email
    #[oai(path = "/assign-role", method = "post", tag = "FunctionTags::Functions")]
    async fn assign_role(&self, req: &Request, body: Json<AssignRoleRequest>) -> Result<Json<AssignRoleResponse>, AdminError> {
        let (_ctx, session) = helpers::require_session(req, &self.token_service, &self.session_service).await?;

        let assignment = self
            .admin_service
            .assign_role_by_email(&session, &body.email, &body.role)
            .await?;

        Ok(Json(AssignRoleResponse {
            success: true,
            message: format!("Role {} assigned to {}", assignment.role, assignment.email),
            user_id: assignment.user_id,
        }))
    }
}
