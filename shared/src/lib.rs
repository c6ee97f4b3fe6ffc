//! Shared types for the floor reservation engine
//!
//! Domain models, unified error codes and common types used by the
//! engine crate and by any embedding server.

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use types::{TimeRange, Timestamp};
