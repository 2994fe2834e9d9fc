use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::db::profile::{self, Entity as Profile};
use crate::types::dto::profile::UpdateProfileRequest;

/// Profile rows, one per user
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert the profile for a freshly created user (inside the sign-up transaction)
    pub async fn insert_profile(
        conn: &impl ConnectionTrait,
        user_id: &str,
        full_name: Option<String>,
    ) -> Result<profile::Model, InternalError> {
        let now = Utc::now().timestamp();
        profile::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            full_name: Set(full_name.filter(|name| !name.trim().is_empty())),
            phone: Set(None),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_profile", e))
    }

    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<profile::Model>, InternalError> {
        Profile::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_profile", e))
    }

    /// All profiles, newest first
    ///
    /// `created_at` has second resolution; ties fall back to id so the order
    /// is stable between calls.
    pub async fn list_newest_first(&self) -> Result<Vec<profile::Model>, InternalError> {
        Profile::find()
            .order_by_desc(profile::Column::CreatedAt)
            .order_by_desc(profile::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_profiles", e))
    }

    /// Apply the supplied fields and return the merged profile
    pub async fn update(&self, user_id: &str, patch: UpdateProfileRequest) -> Result<profile::Model, InternalError> {
        let existing = self
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AuthorizationError::ProfileNotFound(user_id.to_string()))?;

        let mut active: profile::ActiveModel = existing.into();
        if let Some(full_name) = patch.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(avatar_url) = patch.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_profile", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_user, setup_test_db};

    #[tokio::test]
    async fn test_update_only_touches_supplied_fields() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "kim@example.com", crate::types::internal::AppRole::Guest).await;
        let store = ProfileStore::new(db);

        let updated = store
            .update(
                &user.id,
                UpdateProfileRequest {
                    phone: Some("+1 555 0100".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(updated.full_name.as_deref(), Some("Test User"));
        assert!(updated.avatar_url.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_profile_fails() {
        let db = setup_test_db().await;
        let store = ProfileStore::new(db);

        let result = store.update("no-such-user", UpdateProfileRequest::default()).await;

        assert!(matches!(
            result,
            Err(InternalError::Authorization(AuthorizationError::ProfileNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = setup_test_db().await;
        let now = Utc::now().timestamp();
        for (i, user_id) in ["u-old", "u-new"].iter().enumerate() {
            crate::test::utils::insert_raw_user(&db, user_id, &format!("{}@example.com", user_id)).await;
            profile::ActiveModel {
                id: Set(format!("p-{}", i)),
                user_id: Set(user_id.to_string()),
                full_name: Set(None),
                phone: Set(None),
                avatar_url: Set(None),
                created_at: Set(now + i as i64),
                updated_at: Set(now),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let profiles = ProfileStore::new(db).list_newest_first().await.unwrap();

        assert_eq!(profiles[0].user_id, "u-new");
        assert_eq!(profiles[1].user_id, "u-old");
    }

    #[tokio::test]
    async fn test_list_newest_first_is_stable_within_one_second() {
        let db = setup_test_db().await;
        let now = Utc::now().timestamp();
        for id in ["p-b", "p-c", "p-a"] {
            let user_id = format!("u-{}", id);
            crate::test::utils::insert_raw_user(&db, &user_id, &format!("{}@example.com", user_id)).await;
            profile::ActiveModel {
                id: Set(id.to_string()),
                user_id: Set(user_id),
                full_name: Set(None),
                phone: Set(None),
                avatar_url: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&db)
            .await
            .unwrap();
        }
        let store = ProfileStore::new(db);

        let ids: Vec<String> = store
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec!["p-c", "p-b", "p-a"]);
    }
}
