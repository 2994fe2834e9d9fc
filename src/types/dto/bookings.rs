use chrono::NaiveDate;
use poem_openapi::Object;

use crate::errors::InternalError;
use crate::types::db::booking;
use crate::types::dto::common::{decode_string_list, to_rfc3339};
use crate::types::internal::BookingStatus;

/// Room booking
#[derive(Object, Debug, Clone)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    /// Extra ids chosen at booking time (breakfast, parking, wifi)
    pub extras: Vec<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<booking::Model> for Booking {
    type Error = InternalError;

    fn try_from(model: booking::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            extras: decode_string_list("extras", &model.extras)?,
            status: model.status.parse()?,
            id: model.id,
            user_id: model.user_id,
            room_id: model.room_id,
            check_in: model.check_in,
            check_out: model.check_out,
            guests_count: model.guests_count,
            total_price: model.total_price,
            notes: model.notes,
            created_at: to_rfc3339(model.created_at),
            updated_at: to_rfc3339(model.updated_at),
        })
    }
}

/// New booking for the calling guest
#[derive(Object, Debug, Clone)]
pub struct CreateBookingRequest {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[oai(default = "default_guests")]
    pub guests_count: i32,
    /// Computed by the client; stored as given
    pub total_price: f64,
    #[oai(default)]
    pub extras: Vec<String>,
    pub notes: Option<String>,
}

fn default_guests() -> i32 {
    1
}

#[derive(Object, Debug, Clone)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// Booking after create, cancel or status change
#[derive(Object, Debug)]
pub struct BookingWriteResponse {
    pub message: String,
    pub booking: Booking,
}
