use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{SessionService, TokenService, access};
use crate::stores::ServiceStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::hotel_services::{CreateServiceRequest, HotelService, ServiceWriteResponse, UpdateServiceRequest};

/// Spa, transfers and other bookable extras
pub struct HotelServicesApi {
    service_store: Arc<ServiceStore>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl HotelServicesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            service_store: app_data.service_store.clone(),
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
enum ServiceTags {
    /// Hotel services
    Services,
}

#[OpenApi(prefix_path = "/services")]
impl HotelServicesApi {
    /// Available services; admin and staff also see unavailable ones
    #[oai(path = "/", method = "get", tag = "ServiceTags::Services")]
    async fn list_services(&self, req: &Request) -> Result<Json<Vec<HotelService>>, ApiError> {
        let (_ctx, session) = helpers::optional_session(req, &self.token_service, &self.session_service).await?;

        let services = self.service_store.list(access::is_back_office(&session)).await?;
        Ok(Json(services.into_iter().map(HotelService::from).collect()))
    }

    #[oai(path = "/", method = "post", tag = "ServiceTags::Services")]
    async fn create_service(
        &self,
        req: &Request,
        body: Json<CreateServiceRequest>,
    ) -> Result<Json<ServiceWriteResponse>, ApiError> {
        self.require_admin(req).await?;

        let service = self.service_store.create(body.0).await?;

        Ok(Json(ServiceWriteResponse {
            message: "Service created successfully".to_string(),
            service: service.into(),
        }))
    }

    #[oai(path = "/:id", method = "patch", tag = "ServiceTags::Services")]
    async fn update_service(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateServiceRequest>,
    ) -> Result<Json<ServiceWriteResponse>, ApiError> {
        self.require_admin(req).await?;

        let service = self.service_store.update(&id.0, body.0).await?;

        Ok(Json(ServiceWriteResponse {
            message: "Service updated successfully".to_string(),
            service: service.into(),
        }))
    }

    #[oai(path = "/:id", method = "delete", tag = "ServiceTags::Services")]
    async fn delete_service(&self, req: &Request, id: Path<String>) -> Result<Json<MessageResponse>, ApiError> {
        self.require_admin(req).await?;

        self.service_store.delete(&id.0).await?;

        Ok(Json(MessageResponse::new("Service deleted successfully")))
    }
}
