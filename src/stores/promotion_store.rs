use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::require_non_empty;
use crate::types::db::promotion::{self, Entity as Promotion};
use crate::types::dto::common::encode_string_list;
use crate::types::dto::promotions::{CreatePromotionRequest, UpdatePromotionRequest};

pub struct PromotionStore {
    db: DatabaseConnection,
}

fn validate_discount(discount_percent: f64) -> Result<(), InternalError> {
    if !discount_percent.is_finite() || !(0.0..=100.0).contains(&discount_percent) {
        return Err(InternalError::validation("Discount must be between 0 and 100 percent"));
    }
    Ok(())
}

fn validate_window(start: NaiveDate, end: NaiveDate) -> Result<(), InternalError> {
    if end < start {
        return Err(InternalError::validation("End date must not be before start date"));
    }
    Ok(())
}

impl PromotionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<promotion::Model>, InternalError> {
        Promotion::find()
            .order_by_desc(promotion::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_promotions", e))
    }

    /// Promotions switched on whose window contains `today`
    pub async fn list_active(&self, today: NaiveDate) -> Result<Vec<promotion::Model>, InternalError> {
        Promotion::find()
            .filter(promotion::Column::Active.eq(true))
            .filter(promotion::Column::StartDate.lte(today))
            .filter(promotion::Column::EndDate.gte(today))
            .order_by_asc(promotion::Column::EndDate)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_active_promotions", e))
    }

    pub async fn get(&self, id: &str) -> Result<promotion::Model, InternalError> {
        Promotion::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_promotion", e))?
            .ok_or_else(|| InternalError::not_found("promotion", id))
    }

    pub async fn create(&self, req: CreatePromotionRequest) -> Result<promotion::Model, InternalError> {
        require_non_empty("Name", &req.name)?;
        validate_discount(req.discount_percent)?;
        validate_window(req.start_date, req.end_date)?;

        promotion::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            discount_percent: Set(req.discount_percent),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            applicable_room_types: Set(encode_string_list(&req.applicable_room_types)),
            applicable_services: Set(encode_string_list(&req.applicable_services)),
            active: Set(req.active),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_promotion", e))
    }

    /// Partial update; the resulting date window is validated as a whole
    pub async fn update(&self, id: &str, req: UpdatePromotionRequest) -> Result<promotion::Model, InternalError> {
        let existing = self.get(id).await?;

        if let Some(name) = &req.name {
            require_non_empty("Name", name)?;
        }
        if let Some(discount) = req.discount_percent {
            validate_discount(discount)?;
        }
        validate_window(
            req.start_date.unwrap_or(existing.start_date),
            req.end_date.unwrap_or(existing.end_date),
        )?;

        let mut active: promotion::ActiveModel = existing.into();
        if let Some(name) = req.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(discount) = req.discount_percent {
            active.discount_percent = Set(discount);
        }
        if let Some(start) = req.start_date {
            active.start_date = Set(start);
        }
        if let Some(end) = req.end_date {
            active.end_date = Set(end);
        }
        if let Some(room_types) = req.applicable_room_types {
            active.applicable_room_types = Set(encode_string_list(&room_types));
        }
        if let Some(services) = req.applicable_services {
            active.applicable_services = Set(encode_string_list(&services));
        }
        if let Some(flag) = req.active {
            active.active = Set(flag);
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_promotion", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let result = Promotion::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_promotion", e))?;
        if result.rows_affected == 0 {
            return Err(InternalError::not_found("promotion", id));
        }
        Ok(())
    }
}
