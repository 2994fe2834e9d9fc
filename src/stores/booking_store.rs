use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::RoomStore;
use crate::stores::require_non_negative;
use crate::types::db::booking::{self, Entity as Booking};
use crate::types::dto::bookings::CreateBookingRequest;
use crate::types::dto::common::encode_string_list;
use crate::types::internal::{BookingStatus, RoomStatus};

pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// A guest's own bookings, most recent first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<booking::Model>, InternalError> {
        Booking::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_user_bookings", e))
    }

    /// Every booking, by check-in date
    pub async fn list_all(&self) -> Result<Vec<booking::Model>, InternalError> {
        Booking::find()
            .order_by_asc(booking::Column::CheckIn)
            .order_by_asc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_bookings", e))
    }

    pub async fn get(&self, id: &str) -> Result<booking::Model, InternalError> {
        Booking::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_booking", e))?
            .ok_or_else(|| InternalError::not_found("booking", id))
    }

    /// Book a room for `user_id`
    ///
    /// The room must exist and be available, the stay must be at least one
    /// night, and the party must fit the room.
    pub async fn create(&self, user_id: &str, req: CreateBookingRequest) -> Result<booking::Model, InternalError> {
        if req.check_out <= req.check_in {
            return Err(InternalError::validation("Check-out date must be after check-in date"));
        }
        require_non_negative("Total price", req.total_price)?;
        if req.guests_count < 1 {
            return Err(InternalError::validation("At least one guest is required"));
        }

        let room = RoomStore::new(self.db.clone()).get(&req.room_id).await?;
        if room.status != RoomStatus::Available.as_str() {
            return Err(InternalError::validation(format!(
                "Room {} is not available",
                room.room_number
            )));
        }
        if req.guests_count > room.capacity {
            return Err(InternalError::validation(format!(
                "Room {} holds at most {} guests",
                room.room_number, room.capacity
            )));
        }

        let now = Utc::now().timestamp();
        let created = booking::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            room_id: Set(room.id),
            check_in: Set(req.check_in),
            check_out: Set(req.check_out),
            guests_count: Set(req.guests_count),
            total_price: Set(req.total_price),
            status: Set(BookingStatus::Pending.as_str().to_string()),
            extras: Set(encode_string_list(&req.extras)),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_booking", e))?;

        tracing::info!(booking_id = %created.id, user_id = %user_id, "Booking created");
        Ok(created)
    }

    pub async fn update_status(&self, id: &str, status: BookingStatus) -> Result<booking::Model, InternalError> {
        let existing = self.get(id).await?;

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_booking_status", e))
    }
}
