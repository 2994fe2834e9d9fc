use chrono::{NaiveDate, NaiveTime};
use poem_openapi::Object;

use crate::errors::InternalError;
use crate::types::db::{menu_item, table_reservation};
use crate::types::dto::common::to_rfc3339;
use crate::types::internal::ReservationStatus;

#[derive(Object, Debug, Clone)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub available: bool,
    pub created_at: String,
}

impl From<menu_item::Model> for MenuItem {
    fn from(model: menu_item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            image_url: model.image_url,
            available: model.available,
            created_at: to_rfc3339(model.created_at),
        }
    }
}

#[derive(Object, Debug, Clone)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    #[oai(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Partial menu item update; absent fields are left untouched
#[derive(Object, Debug, Clone, Default)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

/// Restaurant table reservation
#[derive(Object, Debug, Clone)]
pub struct TableReservation {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: i32,
    pub table_number: Option<String>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: String,
}

impl TryFrom<table_reservation::Model> for TableReservation {
    type Error = InternalError;

    fn try_from(model: table_reservation::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: model.status.parse()?,
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            time: model.time,
            guests: model.guests,
            table_number: model.table_number,
            notes: model.notes,
            created_at: to_rfc3339(model.created_at),
        })
    }
}

#[derive(Object, Debug, Clone)]
pub struct CreateReservationRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[oai(default = "default_party_size")]
    pub guests: i32,
    pub notes: Option<String>,
}

fn default_party_size() -> i32 {
    2
}

/// Back-office status change; may also seat the party at a table
#[derive(Object, Debug, Clone)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
    pub table_number: Option<String>,
}

#[derive(Object, Debug)]
pub struct MenuItemWriteResponse {
    pub message: String,
    pub menu_item: MenuItem,
}

#[derive(Object, Debug)]
pub struct ReservationWriteResponse {
    pub message: String,
    pub reservation: TableReservation,
}
