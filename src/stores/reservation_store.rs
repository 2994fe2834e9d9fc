use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::table_reservation::{self, Entity as TableReservation};
use crate::types::dto::restaurant::CreateReservationRequest;
use crate::types::internal::ReservationStatus;

/// Restaurant table reservations
pub struct ReservationStore {
    db: DatabaseConnection,
}

impl ReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<table_reservation::Model>, InternalError> {
        TableReservation::find()
            .filter(table_reservation::Column::UserId.eq(user_id))
            .order_by_asc(table_reservation::Column::Date)
            .order_by_asc(table_reservation::Column::Time)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_user_reservations", e))
    }

    /// Every reservation, by date then time
    pub async fn list_all(&self) -> Result<Vec<table_reservation::Model>, InternalError> {
        TableReservation::find()
            .order_by_asc(table_reservation::Column::Date)
            .order_by_asc(table_reservation::Column::Time)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_reservations", e))
    }

    pub async fn get(&self, id: &str) -> Result<table_reservation::Model, InternalError> {
        TableReservation::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_reservation", e))?
            .ok_or_else(|| InternalError::not_found("reservation", id))
    }

    pub async fn create(
        &self,
        user_id: &str,
        req: CreateReservationRequest,
    ) -> Result<table_reservation::Model, InternalError> {
        if req.guests < 1 {
            return Err(InternalError::validation("At least one guest is required"));
        }

        let created = table_reservation::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            date: Set(req.date),
            time: Set(req.time),
            guests: Set(req.guests),
            table_number: Set(None),
            status: Set(ReservationStatus::Pending.as_str().to_string()),
            notes: Set(req.notes),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_reservation", e))?;

        tracing::info!(reservation_id = %created.id, user_id = %user_id, "Table reserved");
        Ok(created)
    }

    /// Change status, optionally assigning a table
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        table_number: Option<String>,
    ) -> Result<table_reservation::Model, InternalError> {
        let existing = self.get(id).await?;

        let mut active: table_reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        if let Some(table_number) = table_number {
            active.table_number = Set(Some(table_number));
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_reservation_status", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ResourceError;
    use crate::test::utils::{create_test_user, setup_test_db};
    use crate::types::internal::AppRole;
    use chrono::{NaiveDate, NaiveTime};

    fn request(day: u32, hour: u32, guests: i32) -> CreateReservationRequest {
        CreateReservationRequest {
            date: NaiveDate::from_ymd_opt(2030, 5, day).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            guests,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_list_all_orders_by_date_then_time() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "diner@example.com", AppRole::Guest).await;
        let store = ReservationStore::new(db);
        store.create(&user.id, request(2, 19, 2)).await.unwrap();
        store.create(&user.id, request(1, 20, 2)).await.unwrap();
        store.create(&user.id, request(1, 18, 4)).await.unwrap();

        let order: Vec<(u32, u32)> = store
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|r| {
                use chrono::{Datelike, Timelike};
                (r.date.day(), r.time.hour())
            })
            .collect();

        assert_eq!(order, vec![(1, 18), (1, 20), (2, 19)]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_party() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "diner@example.com", AppRole::Guest).await;
        let store = ReservationStore::new(db);

        assert!(matches!(
            store.create(&user.id, request(1, 19, 0)).await,
            Err(InternalError::Resource(ResourceError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_status_assigns_table() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "diner@example.com", AppRole::Guest).await;
        let store = ReservationStore::new(db);
        let reservation = store.create(&user.id, request(1, 19, 2)).await.unwrap();
        assert_eq!(reservation.status, "pending");

        let updated = store
            .update_status(&reservation.id, ReservationStatus::Confirmed, Some("T4".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.status, "confirmed");
        assert_eq!(updated.table_number.as_deref(), Some("T4"));
    }
}
