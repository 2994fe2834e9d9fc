// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, MockEnvironment, SecretManager};
use crate::stores::CredentialStore;
use crate::types::db::user;
use crate::types::dto::bookings::CreateBookingRequest;
use crate::types::dto::rooms::CreateRoomRequest;
use crate::types::internal::AppRole;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret-minimum-32-chars";
pub const TEST_PASSWORD: &str = "password123";

/// Fresh in-memory database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

fn test_env(extra: &[(&str, &str)]) -> MockEnvironment {
    MockEnvironment::empty()
        .with_vars(&[
            ("JWT_SECRET", TEST_JWT_SECRET),
            ("PEPPER", TEST_PEPPER),
            ("REFRESH_TOKEN_SECRET", TEST_REFRESH_SECRET),
            ("DATABASE_URL", "sqlite::memory:"),
        ])
        .with_vars(extra)
}

/// AppData over a fresh database, secrets and settings from a mock environment
///
/// `extra_env` overrides settings, e.g. `("ROLE_FETCH_TIMEOUT_MS", "100")`.
pub async fn setup_test_app_data(extra_env: &[(&str, &str)]) -> Arc<AppData> {
    let db = setup_test_db().await;
    let env = Arc::new(test_env(extra_env));

    let settings = BootstrapSettings::from_env_provider(env.clone()).expect("Failed to load test settings");
    let secret_manager = SecretManager::init_with_provider(env).expect("Failed to load test secrets");

    Arc::new(AppData::from_parts(db, settings, secret_manager))
}

/// Insert a bare user row with no profile and no role
pub async fn insert_raw_user(db: &DatabaseConnection, id: &str, email: &str) -> user::Model {
    let now = Utc::now().timestamp();
    user::ActiveModel {
        id: Set(id.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        email_confirmed_at: Set(None),
        last_sign_in_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert raw user")
}

/// Register a user (with profile and role) using `TEST_PASSWORD`
pub async fn create_test_user(db: &DatabaseConnection, email: &str, role: AppRole) -> user::Model {
    CredentialStore::new(db.clone(), TEST_PEPPER.to_string())
        .add_user_with_role(email, TEST_PASSWORD, Some("Test User".to_string()), role, false)
        .await
        .expect("Failed to create test user")
}

/// Standard room with capacity 2
pub fn room_request(room_number: &str, price_per_night: f64) -> CreateRoomRequest {
    CreateRoomRequest {
        room_number: room_number.to_string(),
        room_type: "standard".to_string(),
        capacity: 2,
        price_per_night,
        amenities: vec!["wifi".to_string()],
        images: vec![],
        description: None,
        status: None,
    }
}

/// Two-night stay starting tomorrow
pub fn booking_request(room_id: &str, guests_count: i32) -> CreateBookingRequest {
    let check_in = Utc::now().date_naive() + Duration::days(1);
    CreateBookingRequest {
        room_id: room_id.to_string(),
        check_in,
        check_out: check_in + Duration::days(2),
        guests_count,
        total_price: 200.0,
        extras: vec!["breakfast".to_string()],
        notes: None,
    }
}
