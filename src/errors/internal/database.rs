use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {operation} failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Starting transaction failed: {source}")]
    TransactionBegin {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Committing transaction {operation} failed: {source}")]
    TransactionCommit {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl DatabaseError {
    /// True when the underlying driver reported a UNIQUE constraint violation
    pub fn is_unique_violation(&self) -> bool {
        let source = match self {
            DatabaseError::Operation { source, .. } => source,
            DatabaseError::TransactionBegin { source } => source,
            DatabaseError::TransactionCommit { source, .. } => source,
        };
        matches!(
            source.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ) || source.to_string().contains("UNIQUE")
    }
}
