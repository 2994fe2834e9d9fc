use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::{require_non_empty, require_non_negative};
use crate::types::db::menu_item::{self, Entity as MenuItem};
use crate::types::dto::restaurant::{CreateMenuItemRequest, UpdateMenuItemRequest};

/// Restaurant menu
pub struct MenuStore {
    db: DatabaseConnection,
}

impl MenuStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Menu ordered by category then name
    pub async fn list(&self, include_unavailable: bool) -> Result<Vec<menu_item::Model>, InternalError> {
        let mut query = MenuItem::find();
        if !include_unavailable {
            query = query.filter(menu_item::Column::Available.eq(true));
        }
        query
            .order_by_asc(menu_item::Column::Category)
            .order_by_asc(menu_item::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_menu_items", e))
    }

    pub async fn get(&self, id: &str) -> Result<menu_item::Model, InternalError> {
        MenuItem::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_menu_item", e))?
            .ok_or_else(|| InternalError::not_found("menu item", id))
    }

    pub async fn create(&self, req: CreateMenuItemRequest) -> Result<menu_item::Model, InternalError> {
        require_non_empty("Name", &req.name)?;
        require_non_empty("Category", &req.category)?;
        require_non_negative("Price", req.price)?;

        menu_item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            price: Set(req.price),
            category: Set(req.category.trim().to_string()),
            image_url: Set(req.image_url),
            available: Set(req.available),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_menu_item", e))
    }

    pub async fn update(&self, id: &str, req: UpdateMenuItemRequest) -> Result<menu_item::Model, InternalError> {
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

        let mut active: menu_item::ActiveModel = existing.into();
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
        if let Some(image_url) = req.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(available) = req.available {
            active.available = Set(available);
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_menu_item", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let result = MenuItem::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_menu_item", e))?;
        if result.rows_affected == 0 {
            return Err(InternalError::not_found("menu item", id));
        }
        Ok(())
    }
}
