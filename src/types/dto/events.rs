use chrono::NaiveDate;
use poem_openapi::Object;

use crate::types::db::{event, event_registration};
use crate::types::dto::common::to_rfc3339;

/// Hotel event with its current registration count
#[derive(Object, Debug, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub price: f64,
    /// 0 means unlimited
    pub capacity: i32,
    pub image_url: Option<String>,
    pub registrations: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    pub fn from_model(model: event::Model, registrations: u64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            date: model.date,
            price: model.price,
            capacity: model.capacity,
            image_url: model.image_url,
            registrations,
            created_at: to_rfc3339(model.created_at),
            updated_at: to_rfc3339(model.updated_at),
        }
    }
}

#[derive(Object, Debug, Clone)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[oai(default)]
    pub price: f64,
    #[oai(default)]
    pub capacity: i32,
    pub image_url: Option<String>,
}

/// Partial event update; absent fields are left untouched
#[derive(Object, Debug, Clone, Default)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Object, Debug, Clone)]
pub struct EventRegistration {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub created_at: String,
}

impl From<event_registration::Model> for EventRegistration {
    fn from(model: event_registration::Model) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            user_id: model.user_id,
            created_at: to_rfc3339(model.created_at),
        }
    }
}

#[derive(Object, Debug)]
pub struct EventWriteResponse {
    pub message: String,
    pub event: Event,
}

/// Registration just created
#[derive(Object, Debug)]
pub struct RegistrationWriteResponse {
    pub message: String,
    pub registration: EventRegistration,
}
