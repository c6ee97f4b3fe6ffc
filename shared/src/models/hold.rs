//! Table Hold Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short-lived exclusive claim on a table pending booking confirmation
///
/// A hold expires purely as a function of the supplied time versus
/// `expires_at`; no background timer is involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableHold {
    pub table_id: i64,
    /// Opaque token identifying the staff terminal / session holding the table
    pub owner_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TableHold {
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        at >= self.expires_at
    }

    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        !self.is_expired(at)
    }

    pub fn owned_by(&self, owner_token: &str) -> bool {
        self.owner_token == owner_token
    }
}
