use std::sync::Arc;

use chrono::Utc;
use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{SessionService, TokenService, access};
use crate::stores::PromotionStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::promotions::{CreatePromotionRequest, Promotion, PromotionWriteResponse, UpdatePromotionRequest};

/// Promotions. The public sees what is running today; admins see all.
pub struct PromotionsApi {
    promotion_store: Arc<PromotionStore>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl PromotionsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            promotion_store: app_data.promotion_store.clone(),
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }

    async fn require_admin(&self, req: &Request) -> Result<(), ApiError> {
        let (_ctx, session) = helpers::require_session(req, &self.token_service, &self.session_service).await?;
        access::require_admin(&session)?;
        Ok(())
    }
}

#[derive(Tags)]
enum PromotionTags {
    /// Promotions
    Promotions,
}

#[OpenApi(prefix_path = "/promotions")]
impl PromotionsApi {
    #[oai(path = "/", method = "get", tag = "PromotionTags::Promotions")]
    async fn list_promotions(&self, req: &Request) -> Result<Json<Vec<Promotion>>, ApiError> {
        let (_ctx, session) = helpers::optional_session(req, &self.token_service, &self.session_service).await?;

        let rows = if session.is_admin() {
            self.promotion_store.list_all().await?
        } else {
            self.promotion_store.list_active(Utc::now().date_naive()).await?
        };

        let promotions = rows
            .into_iter()
            .map(Promotion::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Json(promotions))
    }

    #[oai(path = "/", method = "post", tag = "PromotionTags::Promotions")]
    async fn create_promotion(
        &self,
        req: &Request,
        body: Json<CreatePromotionRequest>,
    ) -> Result<Json<PromotionWriteResponse>, ApiError> {
        self.require_admin(req).await?;

        let promotion = self.promotion_store.create(body.0).await?;

        Ok(Json(PromotionWriteResponse {
            message: "Promotion created successfully".to_string(),
            promotion: promotion.try_into()?,
        }))
    }

    #[oai(path = "/:id", method = "patch", tag = "PromotionTags::Promotions")]
    async fn update_promotion(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdatePromotionRequest>,
    ) -> Result<Json<PromotionWriteResponse>, ApiError> {
        self.require_admin(req).await?;

        let promotion = self.promotion_store.update(&id.0, body.0).await?;

        Ok(Json(PromotionWriteResponse {
            message: "Promotion updated successfully".to_string(),
            promotion: promotion.try_into()?,
        }))
    }

    #[oai(path = "/:id", method = "delete", tag = "PromotionTags::Promotions")]
    async fn delete_promotion(&self, req: &Request, id: Path<String>) -> Result<Json<MessageResponse>, ApiError> {
        self.require_admin(req).await?;

        self.promotion_store.delete(&id.0).await?;

        Ok(Json(MessageResponse::new("Promotion deleted successfully")))
    }
}
