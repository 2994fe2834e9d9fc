use chrono::DateTime;
use poem_openapi::Object;

use crate::errors::InternalError;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// "up" when the database answers, otherwise "down"
    pub database: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Confirmation returned by writes that have no row to echo back
#[derive(Object, Debug)]
pub struct MessageResponse {
    /// Human-readable result, e.g. "Room deleted successfully"
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Format a unix timestamp (seconds) as RFC 3339
pub fn to_rfc3339(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

/// Decode a JSON text column holding an array of strings
pub fn decode_string_list(column: &str, raw: &str) -> Result<Vec<String>, InternalError> {
    serde_json::from_str(raw).map_err(|e| InternalError::parse(column, e.to_string()))
}

/// Encode a list of strings for a JSON text column
pub fn encode_string_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}
