use poem_openapi::Object;

use crate::errors::InternalError;
use crate::types::db::room;
use crate::types::dto::common::{decode_string_list, to_rfc3339};
use crate::types::internal::RoomStatus;

/// Hotel room
#[derive(Object, Debug, Clone)]
pub struct Room {
    pub id: String,
    pub room_number: String,
    /// Room category, e.g. "deluxe"
    #[oai(rename = "type")]
    pub room_type: String,
    pub capacity: i32,
    pub price_per_night: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub status: RoomStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<room::Model> for Room {
    type Error = InternalError;

    fn try_from(model: room::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            amenities: decode_string_list("amenities", &model.amenities)?,
            images: decode_string_list("images", &model.images)?,
            status: model.status.parse()?,
            id: model.id,
            room_number: model.room_number,
            room_type: model.room_type,
            capacity: model.capacity,
            price_per_night: model.price_per_night,
            description: model.description,
            created_at: to_rfc3339(model.created_at),
            updated_at: to_rfc3339(model.updated_at),
        })
    }
}

#[derive(Object, Debug, Clone)]
pub struct CreateRoomRequest {
    pub room_number: String,
    #[oai(rename = "type")]
    pub room_type: String,
    #[oai(default = "default_capacity")]
    pub capacity: i32,
    pub price_per_night: f64,
    #[oai(default)]
    pub amenities: Vec<String>,
    #[oai(default)]
    pub images: Vec<String>,
    pub description: Option<String>,
    pub status: Option<RoomStatus>,
}

fn default_capacity() -> i32 {
    1
}

/// Partial room update; absent fields are left untouched
#[derive(Object, Debug, Clone, Default)]
pub struct UpdateRoomRequest {
    pub room_number: Option<String>,
    #[oai(rename = "type")]
    pub room_type: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_night: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub status: Option<RoomStatus>,
}

/// Row after a write, with the confirmation shown to the user
#[derive(Object, Debug)]
pub struct RoomWriteResponse {
    pub message: String,
    pub room: Room,
}
