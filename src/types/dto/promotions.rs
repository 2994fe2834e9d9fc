use chrono::NaiveDate;
use poem_openapi::Object;

use crate::errors::InternalError;
use crate::types::db::promotion;
use crate::types::dto::common::{decode_string_list, to_rfc3339};

#[derive(Object, Debug, Clone)]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_percent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub applicable_room_types: Vec<String>,
    pub applicable_services: Vec<String>,
    pub active: bool,
    pub created_at: String,
}

impl TryFrom<promotion::Model> for Promotion {
    type Error = InternalError;

    fn try_from(model: promotion::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            applicable_room_types: decode_string_list("applicable_room_types", &model.applicable_room_types)?,
            applicable_services: decode_string_list("applicable_services", &model.applicable_services)?,
            id: model.id,
            name: model.name,
            description: model.description,
            discount_percent: model.discount_percent,
            start_date: model.start_date,
            end_date: model.end_date,
            active: model.active,
            created_at: to_rfc3339(model.created_at),
        })
    }
}

#[derive(Object, Debug, Clone)]
pub struct CreatePromotionRequest {
    pub name: String,
    pub description: Option<String>,
    /// 0 to 100
    pub discount_percent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[oai(default)]
    pub applicable_room_types: Vec<String>,
    #[oai(default)]
    pub applicable_services: Vec<String>,
    #[oai(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial promotion update; absent fields are left untouched
#[derive(Object, Debug, Clone, Default)]
pub struct UpdatePromotionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub discount_percent: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub applicable_room_types: Option<Vec<String>>,
    pub applicable_services: Option<Vec<String>>,
    pub active: Option<bool>,
}

#[derive(Object, Debug)]
pub struct PromotionWriteResponse {
    pub message: String,
    pub promotion: Promotion,
}
