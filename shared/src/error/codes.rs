//! Unified error codes for the floor reservation engine
//!
//! This module defines all error codes surfaced by the engine to its callers
//! (booking UI, waitlist UI, floor-plan UI). Error codes are organized by
//! category:
//! - 0xxx: General errors
//! - 4xxx: Booking errors
//! - 5xxx: Hold errors
//! - 7xxx: Table / floor errors
//! - 8xxx: Waitlist errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Time window conflicts with an existing booking or foreign hold
    BookingConflict = 4002,
    /// Lifecycle transition not allowed from the current status
    InvalidTransition = 4003,
    /// Booking requested with no tables
    BookingNoTables = 4004,
    /// Booking interval is malformed (end_at <= start_at)
    InvalidInterval = 4005,
    /// Party size must be positive
    InvalidPartySize = 4006,

    // ==================== 5xxx: Hold ====================
    /// Table is already held by a different owner
    TableAlreadyHeld = 5001,
    /// Active hold belongs to a different owner
    NotHoldOwner = 5002,

    // ==================== 7xxx: Table / Floor ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is disabled and cannot be booked
    TableInactive = 7002,
    /// Floor not found
    FloorNotFound = 7101,
    /// Branch not found
    BranchNotFound = 7201,

    // ==================== 8xxx: Waitlist ====================
    /// Waitlist entry not found
    WaitlistEntryNotFound = 8001,
    /// Waitlist entry is not in the waiting state
    WaitlistEntryNotWaiting = 8002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage / repository error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingConflict => "Time window conflicts with an existing claim",
            ErrorCode::InvalidTransition => "Booking lifecycle transition not allowed",
            ErrorCode::BookingNoTables => "Booking requires at least one table",
            ErrorCode::InvalidInterval => "Interval end must be after its start",
            ErrorCode::InvalidPartySize => "Party size must be positive",

            // Hold
            ErrorCode::TableAlreadyHeld => "Table is already held by another party",
            ErrorCode::NotHoldOwner => "Hold belongs to a different owner",

            // Table / Floor
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableInactive => "Table is disabled",
            ErrorCode::FloorNotFound => "Floor not found",
            ErrorCode::BranchNotFound => "Branch not found",

            // Waitlist
            ErrorCode::WaitlistEntryNotFound => "Waitlist entry not found",
            ErrorCode::WaitlistEntryNotWaiting => "Waitlist entry is no longer waiting",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::BookingConflict),
            4003 => Ok(ErrorCode::InvalidTransition),
            4004 => Ok(ErrorCode::BookingNoTables),
            4005 => Ok(ErrorCode::InvalidInterval),
            4006 => Ok(ErrorCode::InvalidPartySize),

            // Hold
            5001 => Ok(ErrorCode::TableAlreadyHeld),
            5002 => Ok(ErrorCode::NotHoldOwner),

            // Table / Floor
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableInactive),
            7101 => Ok(ErrorCode::FloorNotFound),
            7201 => Ok(ErrorCode::BranchNotFound),

            // Waitlist
            8001 => Ok(ErrorCode::WaitlistEntryNotFound),
            8002 => Ok(ErrorCode::WaitlistEntryNotWaiting),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
