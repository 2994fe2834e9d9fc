use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{SessionService, TokenService, access};
use crate::stores::{MenuStore, ReservationStore};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::restaurant::{
    CreateMenuItemRequest, CreateReservationRequest, MenuItem, MenuItemWriteResponse, ReservationWriteResponse,
    TableReservation, UpdateMenuItemRequest, UpdateReservationStatusRequest,
};
use crate::types::internal::{ReservationStatus, SessionState};

/// Restaurant menu and table reservations
pub struct RestaurantApi {
    menu_store: Arc<MenuStore>,
    reservation_store: Arc<ReservationStore>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl RestaurantApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            menu_store: app_data.menu_store.clone(),
            reservation_store: app_data.reservation_store.clone(),
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }

    async fn session(&self, req: &Request) -> Result<SessionState, ApiError> {
        let (_ctx, session) = helpers::require_session(req, &self.token_service, &self.session_service).await?;
        Ok(session)
    }
}

#[derive(Tags)]
enum RestaurantTags {
    /// Menu items
    Menu,
    /// Table reservations
    Reservations,
}

#[OpenApi(prefix_path = "/restaurant")]
impl RestaurantApi {
    /// Menu by category, then name
    ///
    /// Unavailable items are included only for admin and staff.
    #[oai(path = "/menu", method = "get", tag = "RestaurantTags::Menu")]
    async fn list_menu(&self, req: &Request) -> Result<Json<Vec<MenuItem>>, ApiError> {
        let (_ctx, session) = helpers::optional_session(req, &self.token_service, &self.session_service).await?;

        let items = self.menu_store.list(access::is_back_office(&session)).await?;
        Ok(Json(items.into_iter().map(MenuItem::from).collect()))
    }

    #[oai(path = "/menu", method = "post", tag = "RestaurantTags::Menu")]
    async fn create_menu_item(
        &self,
        req: &Request,
        body: Json<CreateMenuItemRequest>,
    ) -> Result<Json<MenuItemWriteResponse>, ApiError> {
        access::require_admin(&self.session(req).await?)?;

        let item = self.menu_store.create(body.0).await?;

        Ok(Json(MenuItemWriteResponse {
            message: "Menu item created successfully".to_string(),
            menu_item: item.into(),
        }))
    }

    #[oai(path = "/menu/:id", method = "patch", tag = "RestaurantTags::Menu")]
    async fn update_menu_item(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateMenuItemRequest>,
    ) -> Result<Json<MenuItemWriteResponse>, ApiError> {
        access::require_admin(&self.session(req).await?)?;

        let item = self.menu_store.update(&id.0, body.0).await?;

        Ok(Json(MenuItemWriteResponse {
            message: "Menu item updated successfully".to_string(),
            menu_item: item.into(),
        }))
    }

    #[oai(path = "/menu/:id", method = "delete", tag = "RestaurantTags::Menu")]
    async fn delete_menu_item(&self, req: &Request, id: Path<String>) -> Result<Json<MessageResponse>, ApiError> {
        access::require_admin(&self.session(req).await?)?;

        self.menu_store.delete(&id.0).await?;

        Ok(Json(MessageResponse::new("Menu item deleted successfully")))
    }

    /// List reservations
    ///
    /// Admin and staff get all reservations by date and time; everyone else
    /// gets their own.
    #[oai(path = "/reservations", method = "get", tag = "RestaurantTags::Reservations")]
    async fn list_reservations(&self, req: &Request) -> Result<Json<Vec<TableReservation>>, ApiError> {
        let session = self.session(req).await?;
        let user = access::require_user(&session)?;

        let rows = if access::is_back_office(&session) {
            self.reservation_store.list_all().await?
        } else {
            self.reservation_store.list_for_user(&user.id).await?
        };

        let reservations = rows
            .into_iter()
            .map(TableReservation::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Json(reservations))
    }

    #[oai(path = "/reservations", method = "post", tag = "RestaurantTags::Reservations")]
    async fn create_reservation(
        &self,
        req: &Request,
        body: Json<CreateReservationRequest>,
    ) -> Result<Json<ReservationWriteResponse>, ApiError> {
        let session = self.session(req).await?;
        let user = access::require_user(&session)?;

        let reservation = self.reservation_store.create(&user.id, body.0).await?;

        Ok(Json(ReservationWriteResponse {
            message: "Table reserved successfully".to_string(),
            reservation: reservation.try_into()?,
        }))
    }

    /// Cancel one of the caller's reservations
    #[oai(path = "/reservations/:id/cancel", method = "post", tag = "RestaurantTags::Reservations")]
    async fn cancel_reservation(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<ReservationWriteResponse>, ApiError> {
        let session = self.session(req).await?;

        let reservation = self.reservation_store.get(&id.0).await?;
        access::require_owner_or_back_office(&session, &reservation.user_id, "reservation", &id.0)?;

        let status: ReservationStatus = reservation.status.parse()?;
        if matches!(status, ReservationStatus::Cancelled | ReservationStatus::Completed) {
            return Err(ApiError::bad_request(format!(
                "A {} reservation cannot be cancelled",
                status.as_str()
            )));
        }

        let reservation = self
            .reservation_store
            .update_status(&id.0, ReservationStatus::Cancelled, None)
            .await?;

        Ok(Json(ReservationWriteResponse {
            message: "Reservation cancelled".to_string(),
            reservation: reservation.try_into()?,
        }))
    }

    /// Set a reservation's status and optionally its table (admin and staff)
    #[oai(path = "/reservations/:id/status", method = "put", tag = "RestaurantTags::Reservations")]
    async fn update_reservation_status(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateReservationStatusRequest>,
    ) -> Result<Json<ReservationWriteResponse>, ApiError> {
        access::require_back_office(&self.session(req).await?)?;
        let body = body.0;

        let reservation = self
            .reservation_store
            .update_status(&id.0, body.status, body.table_number)
            .await?;

        Ok(Json(ReservationWriteResponse {
            message: "Reservation status updated".to_string(),
            reservation: reservation.try_into()?,
        }))
    }
}
