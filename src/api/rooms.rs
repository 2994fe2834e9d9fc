use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{SessionService, TokenService, access};
use crate::stores::RoomStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::rooms::{CreateRoomRequest, Room, RoomWriteResponse, UpdateRoomRequest};
use crate::types::internal::RoomStatus;

/// Room catalogue. Reads are public, writes are admin only.
pub struct RoomsApi {
    room_store: Arc<RoomStore>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl RoomsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            room_store: app_data.room_store.clone(),
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
enum RoomTags {
    /// Hotel rooms
    Rooms,
}

#[OpenApi(prefix_path = "/rooms")]
impl RoomsApi {
    /// List rooms
    ///
    /// Ordered by room number. Filtering on `available` orders by nightly
    /// price instead.
    #[oai(path = "/", method = "get", tag = "RoomTags::Rooms")]
    async fn list_rooms(&self, status: Query<Option<RoomStatus>>) -> Result<Json<Vec<Room>>, ApiError> {
        let rooms = self
            .room_store
            .list(status.0)
            .await?
            .into_iter()
            .map(Room::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Json(rooms))
    }

    #[oai(path = "/:id", method = "get", tag = "RoomTags::Rooms")]
    async fn get_room(&self, id: Path<String>) -> Result<Json<Room>, ApiError> {
        let room = self.room_store.get(&id.0).await?;
        Ok(Json(room.try_into()?))
    }

    #[oai(path = "/", method = "post", tag = "RoomTags::Rooms")]
    async fn create_room(&self, req: &Request, body: Json<CreateRoomRequest>) -> Result<Json<RoomWriteResponse>, ApiError> {
        self.require_admin(req).await?;

        let room = self.room_store.create(body.0).await?;
        tracing::info!(room_id = %room.id, room_number = %room.room_number, "Room created");

        Ok(Json(RoomWriteResponse {
            message: "Room created successfully".to_string(),
            room: room.try_into()?,
        }))
    }

    #[oai(path = "/:id", method = "patch", tag = "RoomTags::Rooms")]
    async fn update_room(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateRoomRequest>,
    ) -> Result<Json<RoomWriteResponse>, ApiError> {
        self.require_admin(req).await?;

        let room = self.room_store.update(&id.0, body.0).await?;

        Ok(Json(RoomWriteResponse {
            message: "Room updated successfully".to_string(),
            room: room.try_into()?,
        }))
    }

    #[oai(path = "/:id", method = "delete", tag = "RoomTags::Rooms")]
    async fn delete_room(&self, req: &Request, id: Path<String>) -> Result<Json<MessageResponse>, ApiError> {
        self.require_admin(req).await?;

        self.room_store.delete(&id.0).await?;
        tracing::info!(room_id = %id.0, "Room deleted");

        Ok(Json(MessageResponse::new("Room deleted successfully")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_user, room_request, setup_test_app_data};
    use crate::types::internal::AppRole;

    async fn request_as(app_data: &AppData, email: &str, role: AppRole) -> Request {
        let user = create_test_user(&app_data.db, email, role).await;
        let jwt = app_data.token_service.generate_jwt(&user.id).unwrap();
        Request::builder()
            .header("Authorization", format!("Bearer {}", jwt))
            .finish()
    }

    #[tokio::test]
    async fn test_admin_creates_and_anyone_lists() {
        let app_data = setup_test_app_data(&[]).await;
        let admin_req = request_as(&app_data, "admin@example.com", AppRole::Admin).await;
        let api = RoomsApi::new(app_data);

        let created = api.create_room(&admin_req, Json(room_request("101", 120.0))).await.unwrap();
        assert_eq!(created.message, "Room created successfully");
        assert_eq!(created.room.status, RoomStatus::Available);

        let rooms = api.list_rooms(Query(None)).await.unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].amenities, vec!["wifi".to_string()]);
    }

    #[tokio::test]
    async fn test_staff_and_anonymous_cannot_write() {
        let app_data = setup_test_app_data(&[]).await;
        let staff_req = request_as(&app_data, "staff@example.com", AppRole::Staff).await;
        let api = RoomsApi::new(app_data);

        let result = api.create_room(&staff_req, Json(room_request("101", 120.0))).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let result = api.create_room(&Request::builder().finish(), Json(room_request("101", 120.0))).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_duplicate_room_number_conflicts() {
        let app_data = setup_test_app_data(&[]).await;
        let admin_req = request_as(&app_data, "admin@example.com", AppRole::Admin).await;
        let api = RoomsApi::new(app_data);

        api.create_room(&admin_req, Json(room_request("101", 120.0))).await.unwrap();
        let result = api.create_room(&admin_req, Json(room_request("101", 90.0))).await;

        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_room() {
        let app_data = setup_test_app_data(&[]).await;
        let admin_req = request_as(&app_data, "admin@example.com", AppRole::Admin).await;
        let api = RoomsApi::new(app_data);
        let created = api.create_room(&admin_req, Json(room_request("101", 120.0))).await.unwrap();

        let response = api.delete_room(&admin_req, Path(created.room.id.clone())).await.unwrap();

        assert_eq!(response.message, "Room deleted successfully");
        assert!(matches!(api.get_room(Path(created.room.id.clone())).await, Err(ApiError::NotFound(_))));
    }
}
