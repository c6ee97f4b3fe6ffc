//! FloorEngine - the operation surface consumed by staff terminals
//!
//! Wires the clock, repository, per-table lock registry, hold manager,
//! reservation manager, waitlist board and snapshot computer together and
//! exposes the operation contract: create/update/reschedule bookings,
//! check-in/check-out/cancel, acquire/release holds, floor snapshots and
//! the waitlist operations. Every state change is broadcast to
//! subscribers after it has committed.
//!
//! The `epoch` field is a unique identifier generated on each startup.
//! Clients use it to detect engine restarts and trigger a full snapshot
//! refetch.

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::events::{EVENT_CHANNEL_CAPACITY, ReservationEvent};
use crate::holds::TableHoldManager;
use crate::locks::TableLockRegistry;
use crate::repository::ReservationRepository;
use crate::reservations::ReservationManager;
use crate::snapshot::{FloorSnapshotComputer, TableView};
use crate::waitlist::WaitlistBoard;
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Booking, BookingCreate, BookingPatch, TableHold, TableStatus, WaitlistEntry,
    WaitlistEntryCreate,
};
use shared::types::TimeRange;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

pub struct FloorEngine {
    config: EngineConfig,
    repo: Arc<dyn ReservationRepository>,
    locks: Arc<TableLockRegistry>,
    holds: Arc<TableHoldManager>,
    reservations: ReservationManager,
    waitlist: WaitlistBoard,
    snapshots: FloorSnapshotComputer,
    event_tx: broadcast::Sender<ReservationEvent>,
    /// Engine instance epoch, regenerated on every startup
    epoch: String,
}

impl std::fmt::Debug for FloorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorEngine")
            .field("config", &self.config)
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl FloorEngine {
    pub fn new(repo: Arc<dyn ReservationRepository>, config: EngineConfig) -> Self {
        Self::with_clock(repo, config, Arc::new(SystemClock))
    }

    /// Build the engine on an injected clock (tests pin time with
    /// [`crate::clock::FixedClock`])
    pub fn with_clock(
        repo: Arc<dyn ReservationRepository>,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let locks = Arc::new(TableLockRegistry::new());
        let holds = Arc::new(TableHoldManager::new(clock.clone(), config.hold_ttl()));
        let reservations = ReservationManager::new(
            repo.clone(),
            locks.clone(),
            holds.clone(),
            clock.clone(),
            event_tx.clone(),
        );
        let waitlist = WaitlistBoard::new(clock.clone(), event_tx.clone());
        let snapshots = FloorSnapshotComputer::new(
            repo.clone(),
            holds.clone(),
            clock.clone(),
            config.walk_in_buffer(),
        );
        let epoch = uuid::Uuid::new_v4().to_string();
        info!(epoch = %epoch, "floor engine started with new epoch");

        Self {
            config,
            repo,
            locks,
            holds,
            reservations,
            waitlist,
            snapshots,
            event_tx,
            epoch,
        }
    }

    /// Engine instance epoch (unique per startup)
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Subscribe to committed state changes
    pub fn subscribe(&self) -> broadcast::Receiver<ReservationEvent> {
        self.event_tx.subscribe()
    }

    // ==================== Bookings ====================

    pub fn create_booking(
        &self,
        payload: BookingCreate,
        owner_token: Option<&str>,
    ) -> AppResult<Booking> {
        self.reservations.create_booking(payload, owner_token)
    }

    pub fn update_booking(
        &self,
        id: i64,
        patch: BookingPatch,
        owner_token: Option<&str>,
    ) -> AppResult<Booking> {
        self.reservations.update_booking(id, patch, owner_token)
    }

    pub fn reschedule(
        &self,
        id: i64,
        range: TimeRange,
        owner_token: Option<&str>,
    ) -> AppResult<Booking> {
        self.reservations.reschedule(id, range, owner_token)
    }

    pub fn check_in(&self, id: i64) -> AppResult<Booking> {
        self.reservations.check_in(id)
    }

    pub fn check_out(&self, id: i64) -> AppResult<Booking> {
        self.reservations.complete(id)
    }

    pub fn cancel_booking(&self, id: i64) -> AppResult<Booking> {
        self.reservations.cancel(id)
    }

    pub fn get_booking(&self, id: i64) -> AppResult<Booking> {
        self.reservations.get_booking(id)
    }

    // ==================== Holds ====================

    /// Take a short-lived exclusive claim on a table for `owner_token`
    ///
    /// Rejected while a seated party occupies the table; a hold marks a
    /// table someone is about to book, not one in use. The table is read
    /// inside the per-table lock so a check-in committing concurrently is
    /// seen before the hold is granted.
    pub fn acquire_hold(&self, table_id: i64, owner_token: &str) -> AppResult<TableHold> {
        let _claim = self.locks.claim(&[table_id]);
        let table = self.repo.find_table(table_id)?.ok_or_else(|| {
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
        if table.status == TableStatus::Occupied {
            return Err(AppError::conflict(
                table_id,
                format!("Table {} is currently occupied", table_id),
            ));
        }
        let hold = self.holds.acquire(table_id, owner_token)?;
        let _ = self.event_tx.send(ReservationEvent::HoldAcquired {
            hold: hold.clone(),
        });
        Ok(hold)
    }

    pub fn release_hold(&self, table_id: i64, owner_token: &str) -> AppResult<()> {
        let _claim = self.locks.claim(&[table_id]);
        self.holds.release(table_id, owner_token)?;
        let _ = self
            .event_tx
            .send(ReservationEvent::HoldReleased { table_id });
        Ok(())
    }

    pub fn is_held(&self, table_id: i64) -> bool {
        self.holds.active_hold(table_id).is_some()
    }

    /// Drop expired hold entries (memory hygiene only; expiry is already
    /// enforced lazily on every read)
    pub fn sweep_expired_holds(&self) -> usize {
        self.holds.sweep_expired()
    }

    // ==================== Snapshots ====================

    pub fn snapshot(&self, floor_id: i64) -> AppResult<Vec<TableView>> {
        self.snapshots.snapshot(floor_id)
    }

    pub fn snapshot_at(&self, floor_id: i64, at: DateTime<Utc>) -> AppResult<Vec<TableView>> {
        self.snapshots.snapshot_at(floor_id, at)
    }

    // ==================== Waitlist ====================

    pub fn join_waitlist(&self, payload: WaitlistEntryCreate) -> AppResult<WaitlistEntry> {
        self.reservations.check_branch(payload.branch_id)?;
        self.waitlist.join(payload)
    }

    /// Seat a waiting party now on the given tables, for the configured
    /// default duration
    pub fn seat_from_waitlist(
        &self,
        entry_id: i64,
        table_ids: Vec<i64>,
        owner_token: Option<&str>,
    ) -> AppResult<(WaitlistEntry, Booking)> {
        self.waitlist.seat(
            entry_id,
            table_ids,
            self.config.default_duration(),
            &self.reservations,
            owner_token,
        )
    }

    pub fn cancel_waitlist_entry(&self, entry_id: i64) -> AppResult<WaitlistEntry> {
        self.waitlist.cancel(entry_id)
    }

    pub fn mark_waitlist_no_show(&self, entry_id: i64) -> AppResult<WaitlistEntry> {
        self.waitlist.mark_no_show(entry_id)
    }

    pub fn waitlist(&self, branch_id: i64) -> Vec<WaitlistEntry> {
        self.waitlist.list_waiting(branch_id)
    }
}
