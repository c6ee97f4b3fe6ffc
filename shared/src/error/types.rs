//! Error types returned by engine operations

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the engine, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (table/booking identifiers, context)
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a booking conflict error for a table
    pub fn conflict(table_id: i64, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BookingConflict, msg).with_detail("table_id", table_id)
    }

    /// Create an invalid lifecycle transition error
    pub fn invalid_transition(from: impl Into<String>, op: impl Into<String>) -> Self {
        let from = from.into();
        let op = op.into();
        Self::with_message(
            ErrorCode::InvalidTransition,
            format!("Cannot {} a booking in status {}", op, from),
        )
        .with_detail("status", from)
        .with_detail("operation", op)
    }

    /// Create an already-held error
    pub fn already_held(table_id: i64) -> Self {
        Self::new(ErrorCode::TableAlreadyHeld).with_detail("table_id", table_id)
    }

    /// Create a not-hold-owner error
    pub fn not_hold_owner(table_id: i64) -> Self {
        Self::new(ErrorCode::NotHoldOwner).with_detail("table_id", table_id)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// True iff this error is a booking/hold conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::BookingConflict | ErrorCode::TableAlreadyHeld
        )
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::BookingNotFound);
        assert_eq!(err.code, ErrorCode::BookingNotFound);
        assert_eq!(err.message, "Booking not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Party size must be >= 1");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Party size must be >= 1");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Malformed interval")
            .with_detail("field", "end_at")
            .with_detail("reason", "must be after start_at");

        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "end_at");
        assert_eq!(details.get("reason").unwrap(), "must be after start_at");
    }

    #[test]
    fn test_conflict_constructor() {
        let err = AppError::conflict(7, "Table 7 already booked for [12:00, 13:00)");
        assert_eq!(err.code, ErrorCode::BookingConflict);
        assert!(err.is_conflict());
        assert_eq!(err.details.unwrap().get("table_id").unwrap(), 7);
    }

    #[test]
    fn test_invalid_transition_constructor() {
        let err = AppError::invalid_transition("completed", "check_in");
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(err.code.category(), ErrorCategory::Booking);
        assert!(err.message.contains("completed"));
    }

    #[test]
    fn test_hold_constructors() {
        assert_eq!(AppError::already_held(3).code, ErrorCode::TableAlreadyHeld);
        assert_eq!(AppError::not_hold_owner(3).code, ErrorCode::NotHoldOwner);
        assert!(AppError::already_held(3).is_conflict());
        assert!(!AppError::not_hold_owner(3).is_conflict());
    }

    #[test]
    fn test_display() {
        let err = AppError::with_message(ErrorCode::NotFound, "Table 9 not found");
        assert_eq!(format!("{}", err), "Table 9 not found");
    }

    #[test]
    fn test_serialize() {
        let err = AppError::new(ErrorCode::BookingConflict);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":4002"));
    }
}
