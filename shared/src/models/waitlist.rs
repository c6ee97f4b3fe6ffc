//! Waitlist Entry Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Waitlist entry lifecycle status
///
/// `seated`, `cancelled` and `no_show` are terminal. An entry reaches
/// `seated` only by conversion into a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    Waiting,
    Seated,
    Cancelled,
    NoShow,
}

impl WaitlistStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Waiting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Seated => "seated",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }
}

/// Waitlist entry (a waiting walk-in party)
///
/// Never holds a table directly; seating goes through the normal
/// booking-creation path so overlap rules apply uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: i64,
    pub branch_id: i64,
    /// Display code, e.g. "#005"
    pub code: String,
    pub queue_number: u32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub party_size: i32,
    pub note: Option<String>,
    pub status: WaitlistStatus,
    pub joined_at: DateTime<Utc>,
    /// Set when the entry is converted into a booking
    pub seated_booking_id: Option<i64>,
}

impl WaitlistEntry {
    /// Minutes waited so far, measured from join time
    pub fn wait_minutes(&self, at: DateTime<Utc>) -> i64 {
        (at - self.joined_at).num_minutes().max(0)
    }
}

/// Join waitlist payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntryCreate {
    pub branch_id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub party_size: i32,
    pub note: Option<String>,
}
