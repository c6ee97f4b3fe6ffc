//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Current occupancy tag for a table
///
/// Written by the booking lifecycle (check-in/check-out), never directly
/// by callers. Holds are ephemeral and tracked separately; they do not
/// appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Occupied,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub branch_id: i64,
    pub floor_id: i64,
    /// Short display code, e.g. "T12"
    pub code: String,
    pub name: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub is_active: bool,
}

impl DiningTable {
    pub fn new(
        id: i64,
        branch_id: i64,
        floor_id: i64,
        name: impl Into<String>,
        capacity: i32,
    ) -> Self {
        let name = name.into();
        Self {
            id,
            branch_id,
            floor_id,
            code: format!("T{}", id),
            name,
            capacity,
            status: TableStatus::Available,
            is_active: true,
        }
    }
}
