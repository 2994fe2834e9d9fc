use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::stores::{begin_transaction, commit_transaction};
use crate::types::db::user_role::{self, Entity as UserRole};
use crate::types::internal::AppRole;

/// `user_roles` access. Each user holds at most one role row.
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert_role(conn: &impl ConnectionTrait, user_id: &str, role: AppRole) -> Result<(), InternalError> {
        user_role::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            role: Set(role.as_str().to_string()),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_role", e))?;
        Ok(())
    }

    /// Role row for a user, `None` when absent
    pub async fn get_role(&self, user_id: &str) -> Result<Option<AppRole>, InternalError> {
        let row = UserRole::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_role", e))?;

        row.map(|r| r.role.parse::<AppRole>()).transpose()
    }

    /// user_id → role for every role row
    ///
    /// Rows holding an unknown role string are skipped with a warning.
    pub async fn roles_by_user(&self) -> Result<HashMap<String, AppRole>, InternalError> {
        let rows = UserRole::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_roles", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row.role.parse::<AppRole>() {
                Ok(role) => Some((row.user_id, role)),
                Err(e) => {
                    tracing::warn!(user_id = %row.user_id, "Skipping role row: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn count_admins_on(conn: &impl ConnectionTrait) -> Result<u64, InternalError> {
        UserRole::find()
            .filter(user_role::Column::Role.eq(AppRole::Admin.as_str()))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_admins", e))
    }

    /// Swap a user's role in a single transaction
    ///
    /// Deletes any existing row and inserts the new one. With
    /// `protect_last_admin`, demoting away from admin fails when at most one
    /// admin exists; the count is taken inside the same transaction.
    pub async fn replace_role(
        &self,
        user_id: &str,
        role: AppRole,
        protect_last_admin: bool,
    ) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        if protect_last_admin && role != AppRole::Admin && Self::count_admins_on(&txn).await? <= 1 {
            return Err(AuthorizationError::LastAdminDemotion.into());
        }

        UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_role", e))?;

        Self::insert_role(&txn, user_id, role).await?;

        commit_transaction(txn, "replace_role").await?;

        tracing::info!(user_id = %user_id, role = %role, "Role replaced");

        Ok(())
    }
}
