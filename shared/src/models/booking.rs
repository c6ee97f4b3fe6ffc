//! Booking Model

use crate::types::TimeRange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking lifecycle status
///
/// ```text
/// reserved ──► checked_in ──► completed
///     │             │
///     └─────────────┴──► cancelled
/// ```
///
/// `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Reserved,
    CheckedIn,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that claim a table's time window
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Reserved | Self::CheckedIn)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::CheckedIn => "checked_in",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Booking entity
///
/// One booking may span multiple tables; all assigned tables are claimed
/// for the full interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    /// Stable external identifier
    pub uuid: Uuid,
    /// Human-facing code, e.g. "BK20250601-1007"
    pub code: String,
    pub branch_id: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: i32,
    pub table_ids: Vec<i64>,
    /// Half-open claim window `[start_at, end_at)`
    pub range: TimeRange,
    pub status: BookingStatus,
    /// Where the booking came from: "phone", "walk_in", "waitlist", ...
    pub source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// True iff this booking claims `table_id`
    pub fn covers_table(&self, table_id: i64) -> bool {
        self.table_ids.contains(&table_id)
    }
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub branch_id: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: i32,
    pub table_ids: Vec<i64>,
    pub range: TimeRange,
    pub source: Option<String>,
    pub notes: Option<String>,
}

/// Update booking payload; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingPatch {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: Option<i32>,
    pub table_ids: Option<Vec<i64>>,
    pub range: Option<TimeRange>,
    pub notes: Option<String>,
}

impl BookingPatch {
    /// True iff applying this patch can move the booking's claim
    /// (tables or interval), which requires a fresh conflict check.
    pub fn moves_claim(&self) -> bool {
        self.table_ids.is_some() || self.range.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(BookingStatus::Reserved.is_active());
        assert!(BookingStatus::CheckedIn.is_active());
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());

        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Reserved.is_terminal());
    }

    #[test]
    fn test_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::CheckedIn).unwrap(),
            "\"checked_in\""
        );
        let s: BookingStatus = serde_json::from_str("\"reserved\"").unwrap();
        assert_eq!(s, BookingStatus::Reserved);
    }

    #[test]
    fn test_patch_moves_claim() {
        assert!(!BookingPatch::default().moves_claim());
        let patch = BookingPatch {
            table_ids: Some(vec![1]),
            ..Default::default()
        };
        assert!(patch.moves_claim());
    }
}
