use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::services::crypto;
use crate::stores::{ProfileStore, RoleStore, begin_transaction, commit_transaction, unique_or_database};
use crate::types::db::refresh_token::{self, Entity as RefreshToken};
use crate::types::db::user::{self, Entity as User};
use crate::types::internal::AppRole;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// CredentialStore manages user identities and refresh tokens in the database
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl CredentialStore {
    /// Create a new CredentialStore
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - The secret key used for password hashing (from SecretManager)
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self { db, password_pepper }
    }

    /// Register a guest account
    ///
    /// Creates the user, its profile and its `guest` role in one transaction.
    pub async fn add_user(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<user::Model, InternalError> {
        self.add_user_with_role(email, password, full_name, AppRole::Guest, false)
            .await
    }

    /// Register an account with an explicit role
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    /// * `Err(InternalError)` - InvalidEmail, PasswordValidationFailed, DuplicateEmail or a database error
    pub async fn add_user_with_role(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
        role: AppRole,
        email_confirmed: bool,
    ) -> Result<user::Model, InternalError> {
        let email = normalize_email(email);
        Self::validate_email(&email)?;
        Self::validate_password(password)?;

        if self.find_by_email(&email).await?.is_some() {
            return Err(CredentialError::DuplicateEmail(email).into());
        }

        let password_hash = crypto::hash_password(&self.password_pepper, password)?;
        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.clone()),
            password_hash: Set(password_hash),
            email_confirmed_at: Set(email_confirmed.then_some(now)),
            last_sign_in_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let txn = begin_transaction(&self.db).await?;

        let created = new_user
            .insert(&txn)
            .await
            .map_err(|e| match unique_or_database("insert_user", e, "User already registered") {
                InternalError::Resource(_) => CredentialError::DuplicateEmail(email.clone()).into(),
                other => other,
            })?;

        ProfileStore::insert_profile(&txn, &created.id, full_name).await?;
        RoleStore::insert_role(&txn, &created.id, role).await?;

        commit_transaction(txn, "add_user").await?;

        tracing::info!(user_id = %created.id, role = %role, "User registered");

        Ok(created)
    }

    fn validate_email(email: &str) -> Result<(), InternalError> {
        let valid = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace),
            None => false,
        };
        if !valid {
            return Err(CredentialError::InvalidEmail(email.to_string()).into());
        }
        Ok(())
    }

    fn validate_password(password: &str) -> Result<(), InternalError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialError::PasswordValidationFailed(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ))
            .into());
        }
        Ok(())
    }

    /// Verify email/password and return the user
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<user::Model, InternalError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        if !crypto::verify_password(&self.password_pepper, password, &user.password_hash)? {
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Stamp `last_sign_in_at` with the current time
    pub async fn record_sign_in(&self, user_id: &str) -> Result<(), InternalError> {
        let now = Utc::now().timestamp();
        user::ActiveModel {
            id: Set(user_id.to_string()),
            last_sign_in_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| InternalError::database("record_sign_in", e))?;
        Ok(())
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Look up a user by email (normalized before comparing)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Store a refresh token hash for a user
    pub async fn store_refresh_token(
        &self,
        token_hash: String,
        user_id: String,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        Self::insert_refresh_token(&self.db, token_hash, user_id, expires_at).await
    }

    async fn insert_refresh_token(
        conn: &impl ConnectionTrait,
        token_hash: String,
        user_id: String,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        refresh_token::ActiveModel {
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("store_refresh_token", e))?;
        Ok(())
    }

    /// Validate a refresh token hash and return the owning user_id
    ///
    /// # Returns
    /// * `Err(InvalidRefreshToken)` if unknown, `Err(ExpiredRefreshToken)` if past expiry
    pub async fn validate_refresh_token(&self, token_hash: &str) -> Result<String, InternalError> {
        let token = RefreshToken::find_by_id(token_hash.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("validate_refresh_token", e))?
            .ok_or(CredentialError::InvalidRefreshToken)?;

        if token.expires_at < Utc::now().timestamp() {
            return Err(CredentialError::ExpiredRefreshToken.into());
        }

        Ok(token.user_id)
    }

    /// Revoke a refresh token, but only if it belongs to `user_id`
    ///
    /// Returns whether a token was removed. Unknown or foreign tokens are a no-op.
    pub async fn revoke_refresh_token(&self, token_hash: &str, user_id: &str) -> Result<bool, InternalError> {
        let result = RefreshToken::delete_many()
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .filter(refresh_token::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("revoke_refresh_token", e))?;

        Ok(result.rows_affected > 0)
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialStore {{ db: <connection>, password_pepper: <redacted> }}")
    }
}
