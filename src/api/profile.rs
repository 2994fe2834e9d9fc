use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{SessionService, TokenService, access};
use crate::types::dto::profile::{Profile, UpdateProfileRequest};

/// The caller's own profile
pub struct ProfileApi {
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl ProfileApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }
}

#[derive(Tags)]
enum ProfileTags {
    /// Profile of the signed-in user
    Profile,
}

#[OpenApi(prefix_path = "/profile")]
impl ProfileApi {
    #[oai(path = "/", method = "get", tag = "ProfileTags::Profile")]
    async fn get_profile(&self, req: &Request) -> Result<Json<Profile>, ApiError> {
        let ctx = helpers::require_auth(req, &self.token_service)?;
        let user_id = ctx.user_id().unwrap_or_default();

        let profile = self.session_service.get_profile(user_id).await?;
        Ok(Json(profile.into()))
    }

    /// Update the caller's profile
    ///
    /// Only the supplied fields change.
    #[oai(path = "/", method = "patch", tag = "ProfileTags::Profile")]
    async fn update_profile(&self, req: &Request, body: Json<UpdateProfileRequest>) -> Result<Json<Profile>, ApiError> {
        let (_ctx, session) = helpers::require_session(req, &self.token_service, &self.session_service).await?;
        let user = access::require_user(&session)?;

        let profile = self.session_service.update_profile(&user.id, body.0).await?;
        Ok(Json(profile.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_user, setup_test_app_data};
    use crate::types::internal::AppRole;

    #[tokio::test]
    async fn test_update_then_get_profile() {
        let app_data = setup_test_app_data(&[]).await;
        let user = create_test_user(&app_data.db, "guest@example.com", AppRole::Guest).await;
        let jwt = app_data.token_service.generate_jwt(&user.id).unwrap();
        let api = ProfileApi::new(app_data);
        let req = Request::builder()
            .header("Authorization", format!("Bearer {}", jwt))
            .finish();

        let updated = api
            .update_profile(
                &req,
                Json(UpdateProfileRequest {
                    full_name: Some("Renamed Guest".to_string()),
                    ..Default::default()
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name.as_deref(), Some("Renamed Guest"));

        let fetched = api.get_profile(&req).await.unwrap();
        assert_eq!(fetched.full_name.as_deref(), Some("Renamed Guest"));
    }

    #[tokio::test]
    async fn test_profile_requires_login() {
        let api = ProfileApi::new(setup_test_app_data(&[]).await);

        let result = api.get_profile(&Request::builder().finish()).await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
