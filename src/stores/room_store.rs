use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::{require_non_empty, require_non_negative, unique_or_database};
use crate::types::db::booking::{self, Entity as Booking};
use crate::types::db::room::{self, Entity as Room};
use crate::types::dto::common::encode_string_list;
use crate::types::dto::rooms::{CreateRoomRequest, UpdateRoomRequest};
use crate::types::internal::RoomStatus;

const DUPLICATE_ROOM_NUMBER: &str = "Room number already exists";

pub struct RoomStore {
    db: DatabaseConnection,
}

impl RoomStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List rooms, optionally filtered by status
    ///
    /// Ordered by room number, except that available rooms are listed
    /// cheapest first.
    pub async fn list(&self, status: Option<RoomStatus>) -> Result<Vec<room::Model>, InternalError> {
        let mut query = Room::find();
        if let Some(status) = status {
            query = query.filter(room::Column::Status.eq(status.as_str()));
        }
        query = match status {
            Some(RoomStatus::Available) => query
                .order_by_asc(room::Column::PricePerNight)
                .order_by_asc(room::Column::RoomNumber),
            _ => query.order_by_asc(room::Column::RoomNumber),
        };

        query
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_rooms", e))
    }

    pub async fn get(&self, id: &str) -> Result<room::Model, InternalError> {
        Room::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_room", e))?
            .ok_or_else(|| InternalError::not_found("room", id))
    }

    fn validate(room_number: &str, room_type: &str, capacity: i32, price_per_night: f64) -> Result<(), InternalError> {
        require_non_empty("Room number", room_number)?;
        require_non_empty("Room type", room_type)?;
        if capacity < 1 {
            return Err(InternalError::validation("Capacity must be at least 1"));
        }
        require_non_negative("Price per night", price_per_night)
    }

    pub async fn create(&self, req: CreateRoomRequest) -> Result<room::Model, InternalError> {
        Self::validate(&req.room_number, &req.room_type, req.capacity, req.price_per_night)?;

        let now = Utc::now().timestamp();
        let created = room::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            room_number: Set(req.room_number.trim().to_string()),
            room_type: Set(req.room_type.trim().to_string()),
            capacity: Set(req.capacity),
            price_per_night: Set(req.price_per_night),
            amenities: Set(encode_string_list(&req.amenities)),
            images: Set(encode_string_list(&req.images)),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(RoomStatus::Available).as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_database("insert_room", e, DUPLICATE_ROOM_NUMBER))?;

        tracing::info!(room_id = %created.id, room_number = %created.room_number, "Room created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, req: UpdateRoomRequest) -> Result<room::Model, InternalError> {
        let existing = self.get(id).await?;

        Self::validate(
            req.room_number.as_deref().unwrap_or(&existing.room_number),
            req.room_type.as_deref().unwrap_or(&existing.room_type),
            req.capacity.unwrap_or(existing.capacity),
            req.price_per_night.unwrap_or(existing.price_per_night),
        )?;

        let mut active: room::ActiveModel = existing.into();
        if let Some(room_number) = req.room_number {
            active.room_number = Set(room_number.trim().to_string());
        }
        if let Some(room_type) = req.room_type {
            active.room_type = Set(room_type.trim().to_string());
        }
        if let Some(capacity) = req.capacity {
            active.capacity = Set(capacity);
        }
        if let Some(price) = req.price_per_night {
            active.price_per_night = Set(price);
        }
        if let Some(amenities) = req.amenities {
            active.amenities = Set(encode_string_list(&amenities));
        }
        if let Some(images) = req.images {
            active.images = Set(encode_string_list(&images));
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(status) = req.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| unique_or_database("update_room", e, DUPLICATE_ROOM_NUMBER))
    }

    /// Delete a room that has no bookings
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        self.get(id).await?;

        let bookings = Booking::find()
            .filter(booking::Column::RoomId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_room_bookings", e))?;
        if bookings > 0 {
            return Err(InternalError::conflict("Room has bookings and cannot be deleted"));
        }

        Room::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_room", e))?;

        tracing::info!(room_id = %id, "Room deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ResourceError;
    use crate::test::utils::{room_request, setup_test_db};

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = RoomStore::new(setup_test_db().await);

        let room = store.create(room_request("101", 120.0)).await.unwrap();

        assert_eq!(room.status, "available");
        assert_eq!(room.amenities, r#"["wifi"]"#);
        assert_eq!(room.images, "[]");
    }

    #[tokio::test]
    async fn test_duplicate_room_number_is_conflict() {
        let store = RoomStore::new(setup_test_db().await);
        store.create(room_request("101", 120.0)).await.unwrap();

        let result = store.create(room_request("101", 90.0)).await;

        match result {
            Err(InternalError::Resource(ResourceError::Conflict(message))) => {
                assert_eq!(message, DUPLICATE_ROOM_NUMBER)
            }
            other => panic!("Expected conflict, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_values() {
        let store = RoomStore::new(setup_test_db().await);

        let mut zero_capacity = room_request("102", 100.0);
        zero_capacity.capacity = 0;
        assert!(matches!(
            store.create(zero_capacity).await,
            Err(InternalError::Resource(ResourceError::Validation(_)))
        ));
        assert!(matches!(
            store.create(room_request("103", -1.0)).await,
            Err(InternalError::Resource(ResourceError::Validation(_)))
        ));
        assert!(matches!(
            store.create(room_request(" ", 10.0)).await,
            Err(InternalError::Resource(ResourceError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_orders_by_number_and_available_by_price() {
        let store = RoomStore::new(setup_test_db().await);
        store.create(room_request("300", 50.0)).await.unwrap();
        store.create(room_request("100", 200.0)).await.unwrap();
        let mut maintenance = room_request("200", 10.0);
        maintenance.status = Some(RoomStatus::Maintenance);
        store.create(maintenance).await.unwrap();

        let all: Vec<String> = store.list(None).await.unwrap().into_iter().map(|r| r.room_number).collect();
        assert_eq!(all, vec!["100", "200", "300"]);

        let available: Vec<String> = store
            .list(Some(RoomStatus::Available))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.room_number)
            .collect();
        assert_eq!(available, vec!["300", "100"]);
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let store = RoomStore::new(setup_test_db().await);
        let room = store.create(room_request("101", 120.0)).await.unwrap();

        let updated = store
            .update(
                &room.id,
                UpdateRoomRequest {
                    status: Some(RoomStatus::Maintenance),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "maintenance");
        assert_eq!(updated.room_number, "101");
        assert_eq!(updated.price_per_night, 120.0);
    }

    #[tokio::test]
    async fn test_delete_missing_room_is_not_found() {
        let store = RoomStore::new(setup_test_db().await);

        assert!(matches!(
            store.delete("nope").await,
            Err(InternalError::Resource(ResourceError::NotFound { .. }))
        ));
    }
}
