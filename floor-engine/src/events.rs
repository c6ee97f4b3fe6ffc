//! Reservation events
//!
//! Broadcast to subscribed terminals after a state change has committed,
//! never before. Lagging subscribers lose old events and should refetch a
//! floor snapshot.

use serde::{Deserialize, Serialize};
use shared::models::{Booking, TableHold, WaitlistEntry};

/// Broadcast channel capacity; a slow subscriber past this many pending
/// events starts dropping from the oldest
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// State change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReservationEvent {
    BookingCreated { booking: Booking },
    BookingUpdated { booking: Booking },
    BookingCancelled { booking: Booking },
    BookingCheckedIn { booking: Booking },
    BookingCompleted { booking: Booking },
    HoldAcquired { hold: TableHold },
    HoldReleased { table_id: i64 },
    WaitlistJoined { entry: WaitlistEntry },
    WaitlistSeated { entry: WaitlistEntry, booking_id: i64 },
    WaitlistCancelled { entry: WaitlistEntry },
    WaitlistNoShow { entry: WaitlistEntry },
}

impl ReservationEvent {
    /// Event name as carried on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BookingCreated { .. } => "booking_created",
            Self::BookingUpdated { .. } => "booking_updated",
            Self::BookingCancelled { .. } => "booking_cancelled",
            Self::BookingCheckedIn { .. } => "booking_checked_in",
            Self::BookingCompleted { .. } => "booking_completed",
            Self::HoldAcquired { .. } => "hold_acquired",
            Self::HoldReleased { .. } => "hold_released",
            Self::WaitlistJoined { .. } => "waitlist_joined",
            Self::WaitlistSeated { .. } => "waitlist_seated",
            Self::WaitlistCancelled { .. } => "waitlist_cancelled",
            Self::WaitlistNoShow { .. } => "waitlist_no_show",
        }
    }
}
