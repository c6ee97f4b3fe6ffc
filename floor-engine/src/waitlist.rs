//! Waitlist board
//!
//! FIFO queue of waiting walk-in parties, ordered by join time. An entry
//! never owns a table: seating converts it into a booking through
//! [`ReservationManager::create_booking`], so the overlap rules apply to
//! waitlist parties exactly as to phone reservations. On a conflict the
//! entry simply stays `waiting` and the error is surfaced unchanged.
//!
//! [`ReservationManager::create_booking`]: crate::reservations::ReservationManager::create_booking

use crate::clock::Clock;
use crate::events::ReservationEvent;
use crate::reservations::ReservationManager;
use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Booking, BookingCreate, WaitlistEntry, WaitlistEntryCreate, WaitlistStatus,
};
use shared::types::TimeRange;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

#[derive(Default)]
struct Inner {
    /// Insertion-ordered; join order is queue order
    entries: Vec<WaitlistEntry>,
    next_id: i64,
    /// Per-branch running queue number (resets only with the process)
    seq_by_branch: HashMap<i64, u32>,
}

pub struct WaitlistBoard {
    inner: RwLock<Inner>,
    clock: Arc<dyn Clock>,
    event_tx: broadcast::Sender<ReservationEvent>,
}

impl WaitlistBoard {
    pub fn new(clock: Arc<dyn Clock>, event_tx: broadcast::Sender<ReservationEvent>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock,
            event_tx,
        }
    }

    fn broadcast(&self, event: ReservationEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Append a waiting party to the branch queue
    pub fn join(&self, payload: WaitlistEntryCreate) -> AppResult<WaitlistEntry> {
        if payload.party_size < 1 {
            return Err(AppError::with_message(
                ErrorCode::InvalidPartySize,
                format!("Party size must be at least 1, got {}", payload.party_size),
            ));
        }
        if payload.customer_name.trim().is_empty() {
            return Err(AppError::validation("Customer name must not be empty"));
        }

        let entry = {
            let mut inner = self.inner.write();
            inner.next_id += 1;
            let queue_number = {
                let seq = inner.seq_by_branch.entry(payload.branch_id).or_insert(0);
                *seq += 1;
                *seq
            };
            let entry = WaitlistEntry {
                id: inner.next_id,
                branch_id: payload.branch_id,
                code: format!("#{:03}", queue_number),
                queue_number,
                customer_name: payload.customer_name,
                customer_phone: payload.customer_phone,
                party_size: payload.party_size,
                note: payload.note,
                status: WaitlistStatus::Waiting,
                joined_at: self.clock.now(),
                seated_booking_id: None,
            };
            inner.entries.push(entry.clone());
            entry
        };

        info!(entry_id = entry.id, code = %entry.code, "party joined waitlist");
        self.broadcast(ReservationEvent::WaitlistJoined {
            entry: entry.clone(),
        });
        Ok(entry)
    }

    pub fn get(&self, id: i64) -> AppResult<WaitlistEntry> {
        self.inner
            .read()
            .entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::WaitlistEntryNotFound,
                    format!("Waitlist entry {} not found", id),
                )
                .with_detail("entry_id", id)
            })
    }

    /// Entries of a branch in join order, optionally filtered by status
    pub fn list(&self, branch_id: i64, status: Option<WaitlistStatus>) -> Vec<WaitlistEntry> {
        self.inner
            .read()
            .entries
            .iter()
            .filter(|e| e.branch_id == branch_id)
            .filter(|e| status.is_none_or(|s| e.status == s))
            .cloned()
            .collect()
    }

    /// Waiting entries of a branch in queue order
    pub fn list_waiting(&self, branch_id: i64) -> Vec<WaitlistEntry> {
        self.list(branch_id, Some(WaitlistStatus::Waiting))
    }

    /// Seat a waiting party on the given tables, starting now
    ///
    /// The entry is claimed atomically before the booking is attempted, so
    /// two racing seat calls on the same entry can never both create a
    /// booking. Delegates booking creation to the manager; on `Conflict`
    /// the claim is reverted and the entry stays `waiting` (no retry here,
    /// the caller picks different tables or waits).
    pub fn seat(
        &self,
        id: i64,
        table_ids: Vec<i64>,
        duration: chrono::Duration,
        manager: &ReservationManager,
        owner_token: Option<&str>,
    ) -> AppResult<(WaitlistEntry, Booking)> {
        let entry = self.begin_seating(id)?;

        let now = self.clock.now();
        let booking = match manager.create_booking(
            BookingCreate {
                branch_id: entry.branch_id,
                customer_name: Some(entry.customer_name.clone()),
                customer_phone: entry.customer_phone.clone(),
                party_size: entry.party_size,
                table_ids,
                range: TimeRange::new(now, now + duration),
                source: Some("waitlist".into()),
                notes: entry.note.clone(),
            },
            owner_token,
        ) {
            Ok(booking) => booking,
            Err(err) => {
                self.revert_seating(id);
                return Err(err);
            }
        };

        let entry = self.transition(id, WaitlistStatus::Seated, Some(booking.id))?;
        info!(
            entry_id = entry.id,
            booking_id = booking.id,
            "waitlist party seated"
        );
        self.broadcast(ReservationEvent::WaitlistSeated {
            entry: entry.clone(),
            booking_id: booking.id,
        });
        Ok((entry, booking))
    }

    /// Remove a waiting party from the queue (idempotent)
    pub fn cancel(&self, id: i64) -> AppResult<WaitlistEntry> {
        let entry = self.terminal_transition(id, WaitlistStatus::Cancelled)?;
        self.broadcast(ReservationEvent::WaitlistCancelled {
            entry: entry.clone(),
        });
        Ok(entry)
    }

    /// Mark a called party that never showed up (idempotent)
    pub fn mark_no_show(&self, id: i64) -> AppResult<WaitlistEntry> {
        let entry = self.terminal_transition(id, WaitlistStatus::NoShow)?;
        self.broadcast(ReservationEvent::WaitlistNoShow {
            entry: entry.clone(),
        });
        Ok(entry)
    }

    /// Claim a waiting entry for seating: `waiting` -> `seated` with no
    /// booking attached yet. Exactly one of several racing callers gets
    /// the claim; the rest see `WaitlistEntryNotWaiting`.
    fn begin_seating(&self, id: i64) -> AppResult<WaitlistEntry> {
        let mut inner = self.inner.write();
        let entry = inner
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::WaitlistEntryNotFound,
                    format!("Waitlist entry {} not found", id),
                )
                .with_detail("entry_id", id)
            })?;
        if entry.status != WaitlistStatus::Waiting {
            return Err(AppError::with_message(
                ErrorCode::WaitlistEntryNotWaiting,
                format!(
                    "Waitlist entry {} is {}, not waiting",
                    id,
                    entry.status.as_str()
                ),
            )
            .with_detail("entry_id", id));
        }
        entry.status = WaitlistStatus::Seated;
        Ok(entry.clone())
    }

    /// Undo a seating claim whose booking never materialized
    fn revert_seating(&self, id: i64) {
        let mut inner = self.inner.write();
        if let Some(entry) = inner.entries.iter_mut().find(|e| e.id == id) {
            if entry.status == WaitlistStatus::Seated && entry.seated_booking_id.is_none() {
                entry.status = WaitlistStatus::Waiting;
            }
        }
    }

    /// Waiting -> `to`; repeating the same transition is a no-op success,
    /// any other terminal entry is rejected
    fn terminal_transition(&self, id: i64, to: WaitlistStatus) -> AppResult<WaitlistEntry> {
        let current = self.get(id)?;
        if current.status == to {
            return Ok(current);
        }
        if current.status != WaitlistStatus::Waiting {
            return Err(AppError::with_message(
                ErrorCode::WaitlistEntryNotWaiting,
                format!(
                    "Waitlist entry {} is {}, not waiting",
                    id,
                    current.status.as_str()
                ),
            )
            .with_detail("entry_id", id));
        }
        self.transition(id, to, None)
    }

    fn transition(
        &self,
        id: i64,
        to: WaitlistStatus,
        seated_booking_id: Option<i64>,
    ) -> AppResult<WaitlistEntry> {
        let mut inner = self.inner.write();
        let entry = inner
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::WaitlistEntryNotFound,
                    format!("Waitlist entry {} not found", id),
                )
            })?;
        entry.status = to;
        if seated_booking_id.is_some() {
            entry.seated_booking_id = seated_booking_id;
        }
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::events::EVENT_CHANNEL_CAPACITY;
    use crate::holds::TableHoldManager;
    use crate::repository::{InMemoryRepository, ReservationRepository};
    use chrono::{Duration, TimeZone, Utc};
    use shared::models::{BookingStatus, Branch, DiningTable};

    fn setup() -> (
        Arc<FixedClock>,
        Arc<InMemoryRepository>,
        ReservationManager,
        WaitlistBoard,
    ) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap(),
        ));
        let repo = Arc::new(InMemoryRepository::new());
        repo.add_branch(Branch {
            id: 1,
            name: "Centro".into(),
            timezone: "Europe/Madrid".into(),
            is_active: true,
        });
        repo.add_table(DiningTable::new(1, 1, 10, "Window 1", 4));
        repo.add_table(DiningTable::new(2, 1, 10, "Window 2", 2));

        let holds = Arc::new(TableHoldManager::new(
            clock.clone(),
            Duration::seconds(300),
        ));
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let manager = ReservationManager::new(
            repo.clone() as Arc<dyn ReservationRepository>,
            Arc::new(crate::locks::TableLockRegistry::new()),
            holds,
            clock.clone(),
            event_tx.clone(),
        );
        let board = WaitlistBoard::new(clock.clone(), event_tx);
        (clock, repo, manager, board)
    }

    fn join(board: &WaitlistBoard, name: &str, party_size: i32) -> WaitlistEntry {
        board
            .join(WaitlistEntryCreate {
                branch_id: 1,
                customer_name: name.into(),
                customer_phone: None,
                party_size,
                note: None,
            })
            .unwrap()
    }

    #[test]
    fn test_join_assigns_fifo_queue_numbers() {
        let (_clock, _repo, _manager, board) = setup();
        let a = join(&board, "Ana", 2);
        let b = join(&board, "Ben", 4);
        assert_eq!(a.code, "#001");
        assert_eq!(b.code, "#002");

        let waiting = board.list_waiting(1);
        assert_eq!(waiting.len(), 2);
        assert_eq!(waiting[0].id, a.id);
        assert_eq!(waiting[1].id, b.id);
    }

    #[test]
    fn test_join_validation() {
        let (_clock, _repo, _manager, board) = setup();
        let err = board
            .join(WaitlistEntryCreate {
                branch_id: 1,
                customer_name: "Ana".into(),
                customer_phone: None,
                party_size: 0,
                note: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPartySize);
    }

    #[test]
    fn test_seat_creates_booking_and_leaves_queue() {
        let (clock, _repo, manager, board) = setup();
        let entry = join(&board, "Ana", 2);

        let (seated, booking) = board
            .seat(entry.id, vec![1], Duration::minutes(90), &manager, None)
            .unwrap();
        assert_eq!(seated.status, WaitlistStatus::Seated);
        assert_eq!(seated.seated_booking_id, Some(booking.id));
        assert_eq!(booking.status, BookingStatus::Reserved);
        assert_eq!(booking.source.as_deref(), Some("waitlist"));
        assert_eq!(booking.range.start_at, clock.now());
        assert_eq!(booking.range.duration(), Duration::minutes(90));
        assert!(board.list_waiting(1).is_empty());

        // seating twice fails
        let err = board
            .seat(entry.id, vec![2], Duration::minutes(90), &manager, None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WaitlistEntryNotWaiting);
    }

    #[test]
    fn test_seat_conflict_leaves_entry_waiting() {
        let (clock, _repo, manager, board) = setup();
        let now = clock.now();
        manager
            .create_booking(
                shared::models::BookingCreate {
                    branch_id: 1,
                    customer_name: None,
                    customer_phone: None,
                    party_size: 2,
                    table_ids: vec![1],
                    range: TimeRange::new(now, now + Duration::minutes(120)),
                    source: None,
                    notes: None,
                },
                None,
            )
            .unwrap();

        let entry = join(&board, "Ana", 4);
        let err = board
            .seat(entry.id, vec![1], Duration::minutes(90), &manager, None)
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(board.get(entry.id).unwrap().status, WaitlistStatus::Waiting);
    }

    #[test]
    fn test_cancel_and_no_show_are_idempotent_terminal() {
        let (_clock, _repo, _manager, board) = setup();
        let entry = join(&board, "Ana", 2);

        board.cancel(entry.id).unwrap();
        // same transition again is a no-op success
        board.cancel(entry.id).unwrap();
        // a different terminal transition is not
        assert_eq!(
            board.mark_no_show(entry.id).unwrap_err().code,
            ErrorCode::WaitlistEntryNotWaiting
        );

        assert_eq!(
            board.get(99).unwrap_err().code,
            ErrorCode::WaitlistEntryNotFound
        );
    }
}
