use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, SecretManager};
use crate::errors::InternalError;
use crate::services::TokenService;
use crate::stores::{
    BookingStore, CredentialStore, EventStore, MenuStore, ProfileStore, PromotionStore, ReservationStore, RoleStore,
    RoomStore, ServiceStore,
};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across services
/// and API handlers.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, settings)
///   ↓ creates once
///   ├─ secret_manager, token_service
///   ├─ credential_store, profile_store, role_store
///   └─ room, booking, menu, reservation, event, promotion, service stores
///   ↓ wrapped in Arc<AppData>
///   ├─ SessionService / AuthService / AdminService
///   └─ API handlers
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<BootstrapSettings>,
    pub secret_manager: Arc<SecretManager>,
    pub token_service: Arc<TokenService>,
    pub credential_store: Arc<CredentialStore>,
    pub profile_store: Arc<ProfileStore>,
    pub role_store: Arc<RoleStore>,
    pub room_store: Arc<RoomStore>,
    pub booking_store: Arc<BookingStore>,
    pub menu_store: Arc<MenuStore>,
    pub reservation_store: Arc<ReservationStore>,
    pub event_store: Arc<EventStore>,
    pub promotion_store: Arc<PromotionStore>,
    pub service_store: Arc<ServiceStore>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when secret manager initialization fails
    pub async fn init(db: DatabaseConnection, settings: BootstrapSettings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        tracing::debug!("Initializing secret manager...");
        let secret_manager = SecretManager::init()
            .map_err(|e| InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e)))?;
        tracing::debug!("Secret manager initialized");

        let app_data = Self::from_parts(db, settings, secret_manager);

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Assemble stores and services from already-loaded parts
    pub fn from_parts(db: DatabaseConnection, settings: BootstrapSettings, secret_manager: SecretManager) -> Self {
        let token_service = Arc::new(TokenService::new(
            secret_manager.jwt_secret().to_string(),
            secret_manager.refresh_token_secret().to_string(),
        ));

        let credential_store = Arc::new(CredentialStore::new(db.clone(), secret_manager.pepper().to_string()));

        Self {
            settings: Arc::new(settings),
            secret_manager: Arc::new(secret_manager),
            token_service,
            credential_store,
            profile_store: Arc::new(ProfileStore::new(db.clone())),
            role_store: Arc::new(RoleStore::new(db.clone())),
            room_store: Arc::new(RoomStore::new(db.clone())),
            booking_store: Arc::new(BookingStore::new(db.clone())),
            menu_store: Arc::new(MenuStore::new(db.clone())),
            reservation_store: Arc::new(ReservationStore::new(db.clone())),
            event_store: Arc::new(EventStore::new(db.clone())),
            promotion_store: Arc::new(PromotionStore::new(db.clone())),
            service_store: Arc::new(ServiceStore::new(db.clone())),
            db,
        }
    }
}
