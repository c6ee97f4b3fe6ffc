//! ReservationManager - booking lifecycle and conflict-free writes
//!
//! Every operation that claims table time follows the same flow:
//!
//! ```text
//! operation(payload)
//!     ├─ 1. Validate payload (interval, party size, tables)
//!     ├─ 2. Lock the claimed tables (ascending id order)
//!     ├─ 3. Conflict check against committed bookings + foreign holds
//!     ├─ 4. Persist
//!     ├─ 5. Release the caller's own holds on the claimed tables
//!     ├─ 6. Broadcast event
//!     └─ 7. Return booking
//! ```
//!
//! Steps 2-4 are the critical section: between the check and the write no
//! other claim on any of the same tables can run, so two racing claims can
//! never both commit. First committer wins, the loser gets a conflict
//! error with the offending table.
//!
//! Lifecycle transitions (check-in, check-out, cancel, update) follow the
//! same rule: the booking is re-read and its status validated only after
//! its tables are locked, so a transition committed by another terminal
//! in the meantime is never overwritten.

use crate::clock::Clock;
use crate::conflict;
use crate::events::ReservationEvent;
use crate::holds::TableHoldManager;
use crate::locks::{TableClaimGuard, TableLockRegistry};
use crate::repository::ReservationRepository;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Booking, BookingCreate, BookingPatch, BookingStatus, Branch, DiningTable, TableStatus,
};
use shared::types::TimeRange;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

pub struct ReservationManager {
    repo: Arc<dyn ReservationRepository>,
    locks: Arc<TableLockRegistry>,
    holds: Arc<TableHoldManager>,
    clock: Arc<dyn Clock>,
    event_tx: broadcast::Sender<ReservationEvent>,
}

impl ReservationManager {
    pub fn new(
        repo: Arc<dyn ReservationRepository>,
        locks: Arc<TableLockRegistry>,
        holds: Arc<TableHoldManager>,
        clock: Arc<dyn Clock>,
        event_tx: broadcast::Sender<ReservationEvent>,
    ) -> Self {
        Self {
            repo,
            locks,
            holds,
            clock,
            event_tx,
        }
    }

    /// Generate the next human-facing booking code, e.g. "BK20250601-1007"
    fn next_booking_code(&self) -> AppResult<String> {
        let seq = self.repo.next_booking_seq()?;
        let date_str = self.clock.now().format("%Y%m%d").to_string();
        Ok(format!("BK{}-{}", date_str, 1000 + seq))
    }

    fn broadcast(&self, event: ReservationEvent) {
        // no subscribers is fine
        let _ = self.event_tx.send(event);
    }

    /// Load a branch and reject missing or inactive ones
    pub(crate) fn check_branch(&self, branch_id: i64) -> AppResult<Branch> {
        let branch = self.repo.find_branch(branch_id)?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BranchNotFound,
                format!("Branch {} not found", branch_id),
            )
            .with_detail("branch_id", branch_id)
        })?;
        if !branch.is_active {
            return Err(AppError::validation(format!(
                "Branch {} is not active",
                branch_id
            )));
        }
        Ok(branch)
    }

    /// Load a table and reject missing, inactive or wrong-branch ones
    fn check_table(&self, table_id: i64, branch_id: i64) -> AppResult<DiningTable> {
        let table = self
            .repo
            .find_table(table_id)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::TableNotFound,
                    format!("Table {} not found", table_id),
                )
                .with_detail("table_id", table_id)
            })?;
        if !table.is_active {
            return Err(AppError::with_message(
                ErrorCode::TableInactive,
                format!("Table {} is not in service", table_id),
            )
            .with_detail("table_id", table_id));
        }
        if table.branch_id != branch_id {
            return Err(AppError::validation(format!(
                "Table {} does not belong to branch {}",
                table_id, branch_id
            )));
        }
        Ok(table)
    }

    fn validate_range(range: &TimeRange) -> AppResult<()> {
        if !range.is_valid() {
            return Err(AppError::with_message(
                ErrorCode::InvalidInterval,
                format!("Interval end must be after start: {}", range),
            ));
        }
        Ok(())
    }

    fn validate_party_size(party_size: i32) -> AppResult<()> {
        if party_size < 1 {
            return Err(AppError::with_message(
                ErrorCode::InvalidPartySize,
                format!("Party size must be at least 1, got {}", party_size),
            ));
        }
        Ok(())
    }

    /// Conflict check for `table_ids` over `range`, including foreign holds
    ///
    /// Caller must already hold the per-table locks for `table_ids`.
    fn check_claim(
        &self,
        table_ids: &[i64],
        range: &TimeRange,
        exclude: Option<i64>,
        owner_token: &str,
    ) -> AppResult<()> {
        if let Some((table_id, existing)) =
            conflict::first_conflict(self.repo.as_ref(), table_ids, range, exclude)?
        {
            warn!(
                table_id,
                existing = %existing.code,
                range = %range,
                "booking conflict"
            );
            return Err(AppError::conflict(
                table_id,
                format!(
                    "Table {} already booked by {} for {}",
                    table_id, existing.code, existing.range
                ),
            )
            .with_detail("existing_booking_id", existing.id));
        }

        for &table_id in table_ids {
            if self.holds.is_held_by_other(table_id, owner_token) {
                return Err(AppError::already_held(table_id));
            }
        }
        Ok(())
    }

    /// Lock a booking's tables and return a fresh copy read inside the
    /// critical section
    ///
    /// The id -> table-set mapping can change between the initial read and
    /// the lock (a concurrent move), so the claim retries until the locked
    /// set matches what the booking holds. Status checks must run on the
    /// returned copy, never on a read taken before the claim.
    fn claim_booking(&self, id: i64) -> AppResult<(Booking, TableClaimGuard)> {
        loop {
            let snapshot = self.get_booking(id)?;
            let guard = self.locks.claim(&snapshot.table_ids);
            let booking = self.get_booking(id)?;
            if booking.table_ids == snapshot.table_ids {
                return Ok((booking, guard));
            }
        }
    }

    // ==================== Operations ====================

    /// Create a booking; `owner_token` identifies the terminal so its own
    /// holds do not block it and are released once the booking commits
    pub fn create_booking(
        &self,
        payload: BookingCreate,
        owner_token: Option<&str>,
    ) -> AppResult<Booking> {
        Self::validate_range(&payload.range)?;
        Self::validate_party_size(payload.party_size)?;
        if payload.table_ids.is_empty() {
            return Err(AppError::new(ErrorCode::BookingNoTables));
        }
        self.check_branch(payload.branch_id)?;
        for &table_id in &payload.table_ids {
            self.check_table(table_id, payload.branch_id)?;
        }

        let owner = owner_token.unwrap_or("");
        let _claim = self.locks.claim(&payload.table_ids);
        self.check_claim(&payload.table_ids, &payload.range, None, owner)?;

        let now = self.clock.now();
        let booking = self.repo.insert_booking(Booking {
            id: 0,
            uuid: Uuid::new_v4(),
            code: self.next_booking_code()?,
            branch_id: payload.branch_id,
            customer_name: payload.customer_name,
            customer_phone: payload.customer_phone,
            party_size: payload.party_size,
            table_ids: payload.table_ids,
            range: payload.range,
            status: BookingStatus::Reserved,
            source: payload.source,
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        })?;

        self.holds.release_owned(owner, &booking.table_ids);
        info!(
            booking_id = booking.id,
            code = %booking.code,
            range = %booking.range,
            tables = ?booking.table_ids,
            "booking created"
        );
        self.broadcast(ReservationEvent::BookingCreated {
            booking: booking.clone(),
        });
        Ok(booking)
    }

    /// Patch a booking; moving its tables or interval re-runs the conflict
    /// check (excluding the booking itself). Moves are allowed while the
    /// booking is active; a move of a `checked_in` party retags table
    /// occupancy on the tables it leaves and enters.
    pub fn update_booking(
        &self,
        id: i64,
        patch: BookingPatch,
        owner_token: Option<&str>,
    ) -> AppResult<Booking> {
        if let Some(party_size) = patch.party_size {
            Self::validate_party_size(party_size)?;
        }
        if let Some(range) = &patch.range {
            Self::validate_range(range)?;
        }
        if let Some(tables) = &patch.table_ids {
            if tables.is_empty() {
                return Err(AppError::new(ErrorCode::BookingNoTables));
            }
        }

        // lock the union of current and requested tables, re-reading the
        // booking inside the critical section; a concurrent move changes
        // the table set, in which case the claim is retried
        let (mut booking, _claim) = loop {
            let snapshot = self.get_booking(id)?;
            let mut claim_ids = snapshot.table_ids.clone();
            if let Some(tables) = &patch.table_ids {
                claim_ids.extend_from_slice(tables);
            }
            let guard = self.locks.claim(&claim_ids);
            let fresh = self.get_booking(id)?;
            if fresh.table_ids == snapshot.table_ids {
                break (fresh, guard);
            }
        };

        if booking.status.is_terminal() {
            return Err(AppError::invalid_transition(
                booking.status.as_str(),
                "update",
            ));
        }

        let new_tables = patch.table_ids.clone().unwrap_or_else(|| booking.table_ids.clone());
        let new_range = patch.range.unwrap_or(booking.range);

        if patch.moves_claim() {
            for &table_id in &new_tables {
                self.check_table(table_id, booking.branch_id)?;
            }
            let owner = owner_token.unwrap_or("");
            self.check_claim(&new_tables, &new_range, Some(booking.id), owner)?;
        }

        // a seated party moving tables carries its occupancy with it
        if booking.status == BookingStatus::CheckedIn && patch.table_ids.is_some() {
            for &table_id in &booking.table_ids {
                if !new_tables.contains(&table_id) {
                    self.repo.set_table_status(table_id, TableStatus::Available)?;
                }
            }
            for &table_id in &new_tables {
                if !booking.table_ids.contains(&table_id) {
                    self.repo.set_table_status(table_id, TableStatus::Occupied)?;
                    self.holds.clear(table_id);
                }
            }
        }

        if let Some(name) = patch.customer_name {
            booking.customer_name = Some(name);
        }
        if let Some(phone) = patch.customer_phone {
            booking.customer_phone = Some(phone);
        }
        if let Some(party_size) = patch.party_size {
            booking.party_size = party_size;
        }
        if let Some(notes) = patch.notes {
            booking.notes = Some(notes);
        }
        booking.table_ids = new_tables;
        booking.range = new_range;
        booking.updated_at = self.clock.now();
        self.repo.update_booking(&booking)?;

        info!(booking_id = booking.id, code = %booking.code, "booking updated");
        self.broadcast(ReservationEvent::BookingUpdated {
            booking: booking.clone(),
        });
        Ok(booking)
    }

    /// Move a booking to a new interval, keeping its tables
    pub fn reschedule(
        &self,
        id: i64,
        range: TimeRange,
        owner_token: Option<&str>,
    ) -> AppResult<Booking> {
        self.update_booking(
            id,
            BookingPatch {
                range: Some(range),
                ..Default::default()
            },
            owner_token,
        )
    }

    /// Seat the party: `reserved` -> `checked_in`, tables become occupied
    ///
    /// Any hold left on the tables is evicted; a hold never coexists with
    /// an occupied table.
    pub fn check_in(&self, id: i64) -> AppResult<Booking> {
        let (mut booking, _claim) = self.claim_booking(id)?;
        if booking.status != BookingStatus::Reserved {
            return Err(AppError::invalid_transition(
                booking.status.as_str(),
                "check_in",
            ));
        }

        booking.status = BookingStatus::CheckedIn;
        booking.updated_at = self.clock.now();
        self.repo.update_booking(&booking)?;
        for &table_id in &booking.table_ids {
            self.repo.set_table_status(table_id, TableStatus::Occupied)?;
            self.holds.clear(table_id);
        }

        info!(booking_id = booking.id, code = %booking.code, "party checked in");
        self.broadcast(ReservationEvent::BookingCheckedIn {
            booking: booking.clone(),
        });
        Ok(booking)
    }

    /// Finish the visit: `checked_in` -> `completed`, tables free up
    ///
    /// The booking's remaining window is released immediately; a completed
    /// booking never blocks a new claim.
    pub fn complete(&self, id: i64) -> AppResult<Booking> {
        let (mut booking, _claim) = self.claim_booking(id)?;
        if booking.status != BookingStatus::CheckedIn {
            return Err(AppError::invalid_transition(
                booking.status.as_str(),
                "complete",
            ));
        }

        booking.status = BookingStatus::Completed;
        booking.updated_at = self.clock.now();
        self.repo.update_booking(&booking)?;
        for &table_id in &booking.table_ids {
            self.repo.set_table_status(table_id, TableStatus::Available)?;
        }

        info!(booking_id = booking.id, code = %booking.code, "booking completed");
        self.broadcast(ReservationEvent::BookingCompleted {
            booking: booking.clone(),
        });
        Ok(booking)
    }

    /// Cancel a booking from `reserved` or `checked_in`
    pub fn cancel(&self, id: i64) -> AppResult<Booking> {
        let (mut booking, _claim) = self.claim_booking(id)?;
        if booking.status.is_terminal() {
            return Err(AppError::invalid_transition(
                booking.status.as_str(),
                "cancel",
            ));
        }

        let was_seated = booking.status == BookingStatus::CheckedIn;
        booking.status = BookingStatus::Cancelled;
        booking.updated_at = self.clock.now();
        self.repo.update_booking(&booking)?;
        if was_seated {
            for &table_id in &booking.table_ids {
                self.repo.set_table_status(table_id, TableStatus::Available)?;
            }
        }

        info!(booking_id = booking.id, code = %booking.code, "booking cancelled");
        self.broadcast(ReservationEvent::BookingCancelled {
            booking: booking.clone(),
        });
        Ok(booking)
    }

    pub fn get_booking(&self, id: i64) -> AppResult<Booking> {
        self.repo.find_booking(id)?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BookingNotFound,
                format!("Booking {} not found", id),
            )
            .with_detail("booking_id", id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::events::EVENT_CHANNEL_CAPACITY;
    use crate::repository::InMemoryRepository;
    use chrono::{Duration, TimeZone, Utc};

    fn setup() -> (Arc<FixedClock>, Arc<InMemoryRepository>, ReservationManager) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
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
        repo.add_table(DiningTable::new(3, 1, 10, "Booth 1", 6));

        let holds = Arc::new(TableHoldManager::new(
            clock.clone(),
            Duration::seconds(300),
        ));
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let manager = ReservationManager::new(
            repo.clone() as Arc<dyn ReservationRepository>,
            Arc::new(TableLockRegistry::new()),
            holds,
            clock.clone(),
            event_tx,
        );
        (clock, repo, manager)
    }

    fn range(h1: u32, h2: u32) -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2025, 6, 1, h1, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, h2, 0, 0).unwrap(),
        )
    }

    fn payload(table_ids: Vec<i64>, r: TimeRange) -> BookingCreate {
        BookingCreate {
            branch_id: 1,
            customer_name: Some("Ana".into()),
            customer_phone: None,
            party_size: 2,
            table_ids,
            range: r,
            source: Some("phone".into()),
            notes: None,
        }
    }

    #[test]
    fn test_create_assigns_code_and_status() {
        let (_clock, _repo, manager) = setup();
        let booking = manager.create_booking(payload(vec![1], range(18, 20)), None).unwrap();
        assert_eq!(booking.status, BookingStatus::Reserved);
        assert_eq!(booking.code, "BK20250601-1001");

        let second = manager.create_booking(payload(vec![2], range(18, 20)), None).unwrap();
        assert_eq!(second.code, "BK20250601-1002");
    }

    #[test]
    fn test_overlapping_claim_is_rejected() {
        let (_clock, _repo, manager) = setup();
        manager.create_booking(payload(vec![1], range(18, 20)), None).unwrap();

        let err = manager
            .create_booking(payload(vec![1], range(19, 21)), None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingConflict);
        assert_eq!(err.details.unwrap().get("table_id").unwrap(), 1);
    }

    #[test]
    fn test_back_to_back_claims_are_allowed() {
        let (_clock, _repo, manager) = setup();
        manager.create_booking(payload(vec![1], range(18, 20)), None).unwrap();
        manager.create_booking(payload(vec![1], range(20, 22)), None).unwrap();
    }

    #[test]
    fn test_multi_table_claim_rejected_on_any_table() {
        let (_clock, _repo, manager) = setup();
        manager.create_booking(payload(vec![2], range(18, 20)), None).unwrap();

        let err = manager
            .create_booking(payload(vec![1, 2, 3], range(19, 21)), None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingConflict);
    }

    #[test]
    fn test_create_validation() {
        let (_clock, _repo, manager) = setup();

        let mut p = payload(vec![], range(18, 20));
        assert_eq!(
            manager.create_booking(p, None).unwrap_err().code,
            ErrorCode::BookingNoTables
        );

        p = payload(vec![1], range(20, 18));
        assert_eq!(
            manager.create_booking(p, None).unwrap_err().code,
            ErrorCode::InvalidInterval
        );

        p = payload(vec![1], range(18, 20));
        p.party_size = 0;
        assert_eq!(
            manager.create_booking(p, None).unwrap_err().code,
            ErrorCode::InvalidPartySize
        );

        p = payload(vec![99], range(18, 20));
        assert_eq!(
            manager.create_booking(p, None).unwrap_err().code,
            ErrorCode::TableNotFound
        );
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let (_clock, repo, manager) = setup();
        let booking = manager.create_booking(payload(vec![1], range(10, 12)), None).unwrap();

        let seated = manager.check_in(booking.id).unwrap();
        assert_eq!(seated.status, BookingStatus::CheckedIn);
        assert_eq!(
            repo.find_table(1).unwrap().unwrap().status,
            TableStatus::Occupied
        );

        let done = manager.complete(booking.id).unwrap();
        assert_eq!(done.status, BookingStatus::Completed);
        assert_eq!(
            repo.find_table(1).unwrap().unwrap().status,
            TableStatus::Available
        );
    }

    #[test]
    fn test_invalid_transitions() {
        let (_clock, _repo, manager) = setup();
        let booking = manager.create_booking(payload(vec![1], range(10, 12)), None).unwrap();

        // cannot complete before check-in
        assert_eq!(
            manager.complete(booking.id).unwrap_err().code,
            ErrorCode::InvalidTransition
        );

        manager.check_in(booking.id).unwrap();
        // cannot check in twice
        assert_eq!(
            manager.check_in(booking.id).unwrap_err().code,
            ErrorCode::InvalidTransition
        );

        manager.complete(booking.id).unwrap();
        // terminal booking rejects everything
        assert_eq!(
            manager.cancel(booking.id).unwrap_err().code,
            ErrorCode::InvalidTransition
        );
    }

    #[test]
    fn test_cancel_frees_window_immediately() {
        let (_clock, _repo, manager) = setup();
        let booking = manager.create_booking(payload(vec![1], range(18, 20)), None).unwrap();
        manager.cancel(booking.id).unwrap();

        manager.create_booking(payload(vec![1], range(18, 20)), None).unwrap();
    }

    #[test]
    fn test_early_checkout_frees_remaining_window() {
        let (_clock, _repo, manager) = setup();
        let booking = manager.create_booking(payload(vec![1], range(10, 14)), None).unwrap();
        manager.check_in(booking.id).unwrap();
        manager.complete(booking.id).unwrap();

        // completed at 10:00 wall time; the 12-14 slice is free again
        manager.create_booking(payload(vec![1], range(12, 14)), None).unwrap();
    }

    #[test]
    fn test_reschedule_checks_conflicts_excluding_self() {
        let (_clock, _repo, manager) = setup();
        let booking = manager.create_booking(payload(vec![1], range(18, 20)), None).unwrap();

        // shifting within its own old window is fine
        let moved = manager.reschedule(booking.id, range(19, 21), None).unwrap();
        assert_eq!(moved.range, range(19, 21));

        manager.create_booking(payload(vec![1], range(12, 14)), None).unwrap();
        let err = manager.reschedule(booking.id, range(13, 15), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingConflict);

        // failed move leaves the booking untouched
        assert_eq!(manager.get_booking(booking.id).unwrap().range, range(19, 21));
    }

    #[test]
    fn test_seated_party_moves_with_its_occupancy() {
        let (_clock, repo, manager) = setup();
        let booking = manager.create_booking(payload(vec![1], range(10, 12)), None).unwrap();
        manager.check_in(booking.id).unwrap();

        // extending the visit while seated is fine
        let moved = manager.reschedule(booking.id, range(10, 13), None).unwrap();
        assert_eq!(moved.range, range(10, 13));

        // moving tables retags occupancy on both sides
        let moved = manager
            .update_booking(
                booking.id,
                BookingPatch {
                    table_ids: Some(vec![2]),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(moved.table_ids, vec![2]);
        assert_eq!(moved.status, BookingStatus::CheckedIn);
        assert_eq!(
            repo.find_table(1).unwrap().unwrap().status,
            TableStatus::Available
        );
        assert_eq!(
            repo.find_table(2).unwrap().unwrap().status,
            TableStatus::Occupied
        );

        // plain field edits stay allowed
        let patched = manager
            .update_booking(
                booking.id,
                BookingPatch {
                    notes: Some("birthday".into()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(patched.notes.as_deref(), Some("birthday"));

        // terminal bookings reject moves
        manager.complete(booking.id).unwrap();
        let err = manager.reschedule(booking.id, range(11, 14), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[test]
    fn test_move_into_conflict_rejected_while_seated() {
        let (_clock, repo, manager) = setup();
        let blocker = manager.create_booking(payload(vec![2], range(10, 12)), None).unwrap();
        let booking = manager.create_booking(payload(vec![1], range(10, 12)), None).unwrap();
        manager.check_in(booking.id).unwrap();

        let err = manager
            .update_booking(
                booking.id,
                BookingPatch {
                    table_ids: Some(vec![2]),
                    ..Default::default()
                },
                None,
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingConflict);
        assert_eq!(
            err.details.unwrap().get("existing_booking_id").unwrap(),
            blocker.id
        );

        // failed move leaves the occupancy untouched
        assert_eq!(manager.get_booking(booking.id).unwrap().table_ids, vec![1]);
        assert_eq!(
            repo.find_table(1).unwrap().unwrap().status,
            TableStatus::Occupied
        );
    }

    #[test]
    fn test_unknown_or_inactive_branch_rejected() {
        let (_clock, repo, manager) = setup();

        let mut p = payload(vec![1], range(18, 20));
        p.branch_id = 99;
        assert_eq!(
            manager.create_booking(p, None).unwrap_err().code,
            ErrorCode::BranchNotFound
        );

        repo.add_branch(Branch {
            id: 2,
            name: "Puerto".into(),
            timezone: "Europe/Madrid".into(),
            is_active: false,
        });
        let mut p = payload(vec![1], range(18, 20));
        p.branch_id = 2;
        assert_eq!(
            manager.create_booking(p, None).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn test_foreign_hold_blocks_claim() {
        let (clock, _repo, manager) = setup();
        manager.holds.acquire(1, "term-a").unwrap();

        let err = manager
            .create_booking(payload(vec![1], range(18, 20)), Some("term-b"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TableAlreadyHeld);

        // an expired hold no longer blocks
        clock.advance(Duration::seconds(300));
        manager
            .create_booking(payload(vec![1], range(18, 20)), Some("term-b"))
            .unwrap();
    }

    #[test]
    fn test_own_hold_allows_and_is_released_on_commit() {
        let (_clock, _repo, manager) = setup();
        manager.holds.acquire(1, "term-a").unwrap();

        manager
            .create_booking(payload(vec![1], range(10, 12)), Some("term-a"))
            .unwrap();
        assert!(manager.holds.active_hold(1).is_none());
    }
}
