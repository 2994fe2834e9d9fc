// Stores layer - Data access over the hotel database
pub mod booking_store;
pub mod credential_store;
pub mod event_store;
pub mod menu_store;
pub mod profile_store;
pub mod promotion_store;
pub mod reservation_store;
pub mod role_store;
pub mod room_store;
pub mod service_store;

pub use booking_store::BookingStore;
pub use credential_store::CredentialStore;
pub use event_store::EventStore;
pub use menu_store::MenuStore;
pub use profile_store::ProfileStore;
pub use promotion_store::PromotionStore;
pub use reservation_store::ReservationStore;
pub use role_store::RoleStore;
pub use room_store::RoomStore;
pub use service_store::ServiceStore;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

use crate::errors::InternalError;
use crate::errors::internal::DatabaseError;

pub(crate) async fn begin_transaction(db: &DatabaseConnection) -> Result<DatabaseTransaction, InternalError> {
    db.begin()
        .await
        .map_err(|source| DatabaseError::TransactionBegin { source }.into())
}

pub(crate) async fn commit_transaction(txn: DatabaseTransaction, operation: &str) -> Result<(), InternalError> {
    txn.commit().await.map_err(|source| {
        DatabaseError::TransactionCommit {
            operation: operation.to_string(),
            source,
        }
        .into()
    })
}

/// Map a write failure, turning UNIQUE violations into a user-facing conflict
pub(crate) fn unique_or_database(operation: &str, source: DbErr, conflict_message: &str) -> InternalError {
    let err = DatabaseError::Operation {
        operation: operation.to_string(),
        source,
    };
    if err.is_unique_violation() {
        InternalError::conflict(conflict_message)
    } else {
        InternalError::Database(err)
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), InternalError> {
    if value.trim().is_empty() {
        return Err(InternalError::validation(format!("{} is required", field)));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<(), InternalError> {
    if !value.is_finite() || value < 0.0 {
        return Err(InternalError::validation(format!("{} must not be negative", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_rejects_blank() {
        assert!(require_non_empty("Name", "  ").is_err());
        assert!(require_non_empty("Name", "Spa").is_ok());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("Price", 0.0).is_ok());
        assert!(require_non_negative("Price", -0.5).is_err());
        assert!(require_non_negative("Price", f64::NAN).is_err());
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err = unique_or_database(
            "insert_room",
            DbErr::Custom("UNIQUE constraint failed: rooms.room_number".to_string()),
            "Room number already exists",
        );

        assert_eq!(err.to_string(), "Room number already exists");
    }
}
