use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::{begin_transaction, commit_transaction, require_non_empty, require_non_negative, unique_or_database};
use crate::types::db::event::{self, Entity as Event};
use crate::types::db::event_registration::{self, Entity as EventRegistration};
use crate::types::dto::events::{CreateEventRequest, UpdateEventRequest};

/// Hotel events and guest registrations
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Events by date, each paired with its registration count
    pub async fn list(&self) -> Result<Vec<(event::Model, u64)>, InternalError> {
        let events = Event::find()
            .order_by_asc(event::Column::Date)
            .order_by_asc(event::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_events", e))?;

        let registrations = EventRegistration::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_event_registrations", e))?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        for registration in registrations {
            *counts.entry(registration.event_id).or_default() += 1;
        }

        Ok(events
            .into_iter()
            .map(|e| {
                let count = counts.get(&e.id).copied().unwrap_or(0);
                (e, count)
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<(event::Model, u64), InternalError> {
        let event = Self::find_event(&self.db, id).await?;
        let count = Self::count_registrations(&self.db, id).await?;
        Ok((event, count))
    }

    pub async fn create(&self, req: CreateEventRequest) -> Result<event::Model, InternalError> {
        require_non_empty("Name", &req.name)?;
        require_non_negative("Price", req.price)?;
        if req.capacity < 0 {
            return Err(InternalError::validation("Capacity must not be negative"));
        }

        let now = Utc::now().timestamp();
        event::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            date: Set(req.date),
            price: Set(req.price),
            capacity: Set(req.capacity),
            image_url: Set(req.image_url),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_event", e))
    }

    pub async fn update(&self, id: &str, req: UpdateEventRequest) -> Result<event::Model, InternalError> {
        let existing = Self::find_event(&self.db, id).await?;

        if let Some(name) = &req.name {
            require_non_empty("Name", name)?;
        }
        if let Some(price) = req.price {
            require_non_negative("Price", price)?;
        }
        if let Some(capacity) = req.capacity {
            if capacity < 0 {
                return Err(InternalError::validation("Capacity must not be negative"));
            }
            // 0 lifts the limit; anything else must fit who is already registered
            if capacity > 0 {
                let registered = Self::count_registrations(&self.db, id).await?;
                if (capacity as u64) < registered {
                    return Err(InternalError::validation(format!(
                        "Capacity cannot be lower than the {} current registrations",
                        registered
                    )));
                }
            }
        }

        let mut active: event::ActiveModel = existing.into();
        if let Some(name) = req.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(date) = req.date {
            active.date = Set(date);
        }
        if let Some(price) = req.price {
            active.price = Set(price);
        }
        if let Some(capacity) = req.capacity {
            active.capacity = Set(capacity);
        }
        if let Some(image_url) = req.image_url {
            active.image_url = Set(Some(image_url));
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_event", e))
    }

    /// Delete an event together with its registrations
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        Self::find_event(&txn, id).await?;

        EventRegistration::delete_many()
            .filter(event_registration::Column::EventId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_event_registrations", e))?;

        Event::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_event", e))?;

        commit_transaction(txn, "delete_event").await
    }

    /// Register a user for an event
    ///
    /// Capacity is checked inside the same transaction as the insert. A
    /// capacity of 0 never fills up.
    pub async fn register(&self, event_id: &str, user_id: &str) -> Result<event_registration::Model, InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let event = Self::find_event(&txn, event_id).await?;

        let already = EventRegistration::find()
            .filter(event_registration::Column::EventId.eq(event_id))
            .filter(event_registration::Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_event_registration", e))?;
        if already.is_some() {
            return Err(InternalError::conflict("Already registered for this event"));
        }

        if event.capacity > 0 {
            let taken = Self::count_registrations(&txn, event_id).await?;
            if taken >= event.capacity as u64 {
                return Err(InternalError::conflict("Event is full"));
            }
        }

        let registration = event_registration::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            event_id: Set(event_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&txn)
        .await
        .map_err(|e| unique_or_database("insert_event_registration", e, "Already registered for this event"))?;

        commit_transaction(txn, "register_for_event").await?;

        tracing::info!(event_id = %event_id, user_id = %user_id, "Event registration created");
        Ok(registration)
    }

    pub async fn unregister(&self, event_id: &str, user_id: &str) -> Result<(), InternalError> {
        let result = EventRegistration::delete_many()
            .filter(event_registration::Column::EventId.eq(event_id))
            .filter(event_registration::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_event_registration", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found("event registration", event_id));
        }
        Ok(())
    }

    pub async fn list_registrations(&self, event_id: &str) -> Result<Vec<event_registration::Model>, InternalError> {
        Self::find_event(&self.db, event_id).await?;

        EventRegistration::find()
            .filter(event_registration::Column::EventId.eq(event_id))
            .order_by_asc(event_registration::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_event_registrations", e))
    }

    /// Registrations held by one user
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<event_registration::Model>, InternalError> {
        EventRegistration::find()
            .filter(event_registration::Column::UserId.eq(user_id))
            .order_by_desc(event_registration::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_user_registrations", e))
    }

    async fn find_event(conn: &impl ConnectionTrait, id: &str) -> Result<event::Model, InternalError> {
        Event::find_by_id(id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_event", e))?
            .ok_or_else(|| InternalError::not_found("event", id))
    }

    async fn count_registrations(conn: &impl ConnectionTrait, event_id: &str) -> Result<u64, InternalError> {
        EventRegistration::find()
            .filter(event_registration::Column::EventId.eq(event_id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_event_registrations", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ResourceError;
    use crate::test::utils::{create_test_user, setup_test_db};
    use crate::types::internal::AppRole;
    use chrono::NaiveDate;

    fn event_request(name: &str, capacity: i32) -> CreateEventRequest {
        CreateEventRequest {
            name: name.to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            price: 0.0,
            capacity,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_register_counts_and_rejects_duplicates() {
        let db = setup_test_db().await;
        let guest = create_test_user(&db, "guest@example.com", AppRole::Guest).await;
        let store = EventStore::new(db);
        let event = store.create(event_request("Wine tasting", 10)).await.unwrap();

        store.register(&event.id, &guest.id).await.unwrap();
        let (_, count) = store.get(&event.id).await.unwrap();
        assert_eq!(count, 1);

        let result = store.register(&event.id, &guest.id).await;
        assert!(matches!(
            result,
            Err(InternalError::Resource(ResourceError::Conflict(ref m))) if m == "Already registered for this event"
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_when_full() {
        let db = setup_test_db().await;
        let first = create_test_user(&db, "first@example.com", AppRole::Guest).await;
        let second = create_test_user(&db, "second@example.com", AppRole::Guest).await;
        let store = EventStore::new(db);
        let event = store.create(event_request("Cooking class", 1)).await.unwrap();

        store.register(&event.id, &first.id).await.unwrap();
        let result = store.register(&event.id, &second.id).await;

        assert!(matches!(
            result,
            Err(InternalError::Resource(ResourceError::Conflict(ref m))) if m == "Event is full"
        ));
    }

    #[tokio::test]
    async fn test_zero_capacity_is_unlimited() {
        let db = setup_test_db().await;
        let store = EventStore::new(db.clone());
        let event = store.create(event_request("Pool party", 0)).await.unwrap();

        for i in 0..3 {
            let user = create_test_user(&db, &format!("guest{}@example.com", i), AppRole::Guest).await;
            store.register(&event.id, &user.id).await.unwrap();
        }

        assert_eq!(store.list_registrations(&event.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unregister_and_delete() {
        let db = setup_test_db().await;
        let guest = create_test_user(&db, "guest@example.com", AppRole::Guest).await;
        let store = EventStore::new(db);
        let event = store.create(event_request("Jazz night", 5)).await.unwrap();

        store.register(&event.id, &guest.id).await.unwrap();
        store.unregister(&event.id, &guest.id).await.unwrap();
        assert!(store.unregister(&event.id, &guest.id).await.is_err());

        store.register(&event.id, &guest.id).await.unwrap();
        store.delete(&event.id).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert!(store.list_for_user(&guest.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_negative_capacity() {
        let store = EventStore::new(setup_test_db().await);

        assert!(matches!(
            store.create(event_request("Gala", -1)).await,
            Err(InternalError::Resource(ResourceError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_capacity_below_registrations_is_rejected() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice@example.com", AppRole::Guest).await;
        let bob = create_test_user(&db, "bob@example.com", AppRole::Guest).await;
        let store = EventStore::new(db);
        let event = store.create(event_request("Jazz night", 5)).await.unwrap();
        store.register(&event.id, &alice.id).await.unwrap();
        store.register(&event.id, &bob.id).await.unwrap();

        let shrink = |capacity| UpdateEventRequest {
            capacity: Some(capacity),
            ..Default::default()
        };

        let result = store.update(&event.id, shrink(1)).await;
        assert!(matches!(
            result,
            Err(InternalError::Resource(ResourceError::Validation(ref m)))
                if m == "Capacity cannot be lower than the 2 current registrations"
        ));
        let (unchanged, _) = store.get(&event.id).await.unwrap();
        assert_eq!(unchanged.capacity, 5);

        assert_eq!(store.update(&event.id, shrink(2)).await.unwrap().capacity, 2);
        assert_eq!(store.update(&event.id, shrink(0)).await.unwrap().capacity, 0);
    }
}
