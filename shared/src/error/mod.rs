//! Unified error system for the reservation engine
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all failure types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Booking errors
//! - 5xxx: Hold errors
//! - 7xxx: Table / floor errors
//! - 8xxx: Waitlist errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::BookingNotFound);
//!
//! // Create an error with custom message and details
//! let err = AppError::validation("Malformed interval")
//!     .with_detail("field", "end_at");
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
