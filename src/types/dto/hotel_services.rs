use poem_openapi::Object;

use crate::types::db::service;
use crate::types::dto::common::to_rfc3339;

/// Bookable hotel service (spa, transfer, ...)
#[derive(Object, Debug, Clone)]
pub struct HotelService {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub available: bool,
    pub created_at: String,
}

impl From<service::Model> for HotelService {
    fn from(model: service::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            available: model.available,
            created_at: to_rfc3339(model.created_at),
        }
    }
}

#[derive(Object, Debug, Clone)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[oai(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Partial service update; absent fields are left untouched
#[derive(Object, Debug, Clone, Default)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

#[derive(Object, Debug)]
pub struct ServiceWriteResponse {
    pub message: String,
    pub service: HotelService,
}
