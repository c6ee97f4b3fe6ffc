//! Floor snapshot computation
//!
//! Answers "what can I do with this table right now" for every table of a
//! floor. A pure read projection over the repository and the hold manager:
//! it never mutates anything and tolerates running concurrently with
//! writes, at read-committed freshness.

use crate::clock::Clock;
use crate::holds::TableHoldManager;
use crate::repository::ReservationRepository;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Booking, BookingStatus, DiningTable, TableHold};
use shared::types::TimeRange;
use std::sync::Arc;

/// Booking fields a floor plan cares about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSummary {
    pub id: i64,
    pub code: String,
    pub customer_name: Option<String>,
    pub party_size: i32,
    pub range: TimeRange,
    pub status: BookingStatus,
}

impl From<&Booking> for BookingSummary {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id,
            code: b.code.clone(),
            customer_name: b.customer_name.clone(),
            party_size: b.party_size,
            range: b.range,
            status: b.status,
        }
    }
}

/// Derived availability flags for one table at one instant
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableFlags {
    /// No current booking and no active hold
    pub is_available: bool,
    /// Current booking is `reserved` (party not yet arrived)
    pub is_reserved: bool,
    /// Current booking is `checked_in`
    pub is_occupied: bool,
    pub is_held: bool,
    pub has_current_booking: bool,
    pub has_next_booking: bool,
    /// Available now and no reserved booking starting inside the
    /// walk-in buffer window
    pub can_walk_in: bool,
    /// Table exists and is in service; independent of today's bookings
    pub can_future_book: bool,
    /// Next booking starts inside the buffer window
    pub show_upcoming_badge: bool,
    pub show_occupied_badge: bool,
}

/// One table's slice of a floor snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    pub table: DiningTable,
    pub flags: TableFlags,
    pub current_booking: Option<BookingSummary>,
    pub next_booking: Option<BookingSummary>,
    pub hold: Option<TableHold>,
}

pub struct FloorSnapshotComputer {
    repo: Arc<dyn ReservationRepository>,
    holds: Arc<TableHoldManager>,
    clock: Arc<dyn Clock>,
    /// Walk-in buffer: a reserved booking starting within this window
    /// blocks walk-ins and raises the upcoming badge
    buffer: Duration,
}

impl FloorSnapshotComputer {
    pub fn new(
        repo: Arc<dyn ReservationRepository>,
        holds: Arc<TableHoldManager>,
        clock: Arc<dyn Clock>,
        buffer: Duration,
    ) -> Self {
        Self {
            repo,
            holds,
            clock,
            buffer,
        }
    }

    /// Snapshot of every table on `floor_id` at the current instant
    pub fn snapshot(&self, floor_id: i64) -> AppResult<Vec<TableView>> {
        self.snapshot_at(floor_id, self.clock.now())
    }

    /// Snapshot at an arbitrary instant (used for "what does tonight look
    /// like" projections and for tests)
    pub fn snapshot_at(&self, floor_id: i64, at: DateTime<Utc>) -> AppResult<Vec<TableView>> {
        if self.repo.find_floor(floor_id)?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::FloorNotFound,
                format!("Floor {} not found", floor_id),
            )
            .with_detail("floor_id", floor_id));
        }

        let tables = self.repo.list_tables_for_floor(floor_id)?;
        let bookings = self.repo.list_bookings_for_floor(floor_id, None)?;

        Ok(tables
            .into_iter()
            .map(|table| self.view_for(table, &bookings, at))
            .collect())
    }

    fn view_for(&self, table: DiningTable, bookings: &[Booking], at: DateTime<Utc>) -> TableView {
        let mut covering: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.covers_table(table.id))
            .filter(|b| b.status.is_active())
            .collect();
        covering.sort_by_key(|b| b.range.start_at);

        // a checked-in party wins over a reserved one covering the same
        // instant (late check-in running past the next slot's start)
        let current = covering
            .iter()
            .filter(|b| b.range.contains(at))
            .max_by_key(|b| (b.status == BookingStatus::CheckedIn, b.range.start_at))
            .copied();

        let next = covering
            .iter()
            .filter(|b| b.status == BookingStatus::Reserved)
            .find(|b| b.range.start_at > at)
            .copied();

        let hold = self.holds.active_hold(table.id);

        let is_occupied = current.is_some_and(|b| b.status == BookingStatus::CheckedIn);
        let is_reserved = current.is_some_and(|b| b.status == BookingStatus::Reserved);
        let is_held = hold.is_some();
        let is_available = current.is_none() && !is_held;

        let next_within_buffer = next.is_some_and(|b| b.range.start_at - at <= self.buffer);

        let flags = TableFlags {
            is_available,
            is_reserved,
            is_occupied,
            is_held,
            has_current_booking: current.is_some(),
            has_next_booking: next.is_some(),
            can_walk_in: table.is_active && is_available && !next_within_buffer,
            can_future_book: table.is_active,
            show_upcoming_badge: next_within_buffer,
            show_occupied_badge: is_occupied,
        };

        TableView {
            table,
            flags,
            current_booking: current.map(BookingSummary::from),
            next_booking: next.map(BookingSummary::from),
            hold,
        }
    }
}
