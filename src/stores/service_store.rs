use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::{require_non_empty, require_non_negative};
use crate::types::db::service::{self, Entity as Service};
use crate::types::dto::hotel_services::{CreateServiceRequest, UpdateServiceRequest};

/// Bookable hotel services
pub struct ServiceStore {
    db: DatabaseConnection,
}

impl ServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, include_unavailable: bool) -> Result<Vec<service::Model>, InternalError> {
        let mut query = Service::find();
        if !include_unavailable {
            query = query.filter(service::Column::Available.eq(true));
        }
        query
            .order_by_asc(service::Column::Category)
            .order_by_asc(service::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_services", e))
    }

    pub async fn get(&self, id: &str) -> Result<service::Model, InternalError> {
        Service::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_service", e))?
            .ok_or_else(|| InternalError::not_found("service", id))
    }

    pub async fn create(&self, req: CreateServiceRequest) -> Result<service::Model, InternalError> {
        require_non_empty("Name", &req.name)?;
        require_non_empty("Category", &req.category)?;
        require_non_negative("Price", req.price)?;

        service::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            price: Set(req.price),
            category: Set(req.category.trim().to_string()),
            available: Set(req.available),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_service", e))
    }

    pub async fn update(&self, id: &str, req: UpdateServiceRequest) -> Result<service::Model, InternalError> {
        let existing = self.get(id).await?;

        if let Some(name) = &req.name {
            require_non_empty("Name", name)?;
        }
        if let Some(category) = &req.category {
            require_non_empty("Category", category)?;
        }
        if let Some(price) = req.price {
            require_non_negative("Price", price)?;
        }

        let mut active: service::ActiveModel = existing.into();
        if let Some(name) = req.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = req.price {
            active.price = Set(price);
        }
        if let Some(category) = req.category {
            active.category = Set(category.trim().to_string());
        }
        if let Some(available) = req.available {
            active.available = Set(available);
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_service", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let result = Service::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_service", e))?;
        if result.rows_affected == 0 {
            return Err(InternalError::not_found("service", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    fn request(name: &str, category: &str, available: bool) -> CreateServiceRequest {
        CreateServiceRequest {
            name: name.to_string(),
            description: Some("Sixty minutes".to_string()),
            price: 80.0,
            category: category.to_string(),
            available,
        }
    }

    #[tokio::test]
    async fn test_list_hides_unavailable_by_default() {
        let store = ServiceStore::new(setup_test_db().await);
        store.create(request("Massage", "spa", true)).await.unwrap();
        store.create(request("Airport pickup", "transport", false)).await.unwrap();

        assert_eq!(store.list(false).await.unwrap().len(), 1);
        assert_eq!(store.list(true).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = ServiceStore::new(setup_test_db().await);
        let created = store.create(request("Massage", "spa", true)).await.unwrap();

        let updated = store
            .update(
                &created.id,
                UpdateServiceRequest {
                    price: Some(95.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 95.0);
        assert_eq!(updated.category, "spa");

        store.delete(&created.id).await.unwrap();
        assert!(store.get(&created.id).await.is_err());
    }
}
