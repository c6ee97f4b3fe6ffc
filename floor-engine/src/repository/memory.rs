//! In-memory repository
//!
//! Reference implementation backing tests and single-process deployments.
//! All state sits behind one RwLock; individual operations are atomic,
//! cross-operation serialization is the engine's job.

use super::{RepoError, RepoResult, ReservationRepository};
use parking_lot::RwLock;
use shared::models::{Booking, Branch, DiningTable, Floor, TableStatus};
use shared::types::TimeRange;
use std::collections::HashMap;

#[derive(Default)]
struct Inner {
    branches: HashMap<i64, Branch>,
    floors: HashMap<i64, Floor>,
    tables: HashMap<i64, DiningTable>,
    bookings: HashMap<i64, Booking>,
    next_booking_id: i64,
    booking_seq: u64,
}

/// In-memory implementation of [`ReservationRepository`]
#[derive(Default)]
pub struct InMemoryRepository {
    inner: RwLock<Inner>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Seeding (not part of the engine contract) ====================

    pub fn add_branch(&self, branch: Branch) {
        self.inner.write().branches.insert(branch.id, branch);
    }

    pub fn add_floor(&self, floor: Floor) {
        self.inner.write().floors.insert(floor.id, floor);
    }

    pub fn add_table(&self, table: DiningTable) {
        self.inner.write().tables.insert(table.id, table);
    }

    /// Number of stored bookings (all statuses)
    pub fn booking_count(&self) -> usize {
        self.inner.read().bookings.len()
    }
}

impl ReservationRepository for InMemoryRepository {
    fn next_booking_seq(&self) -> RepoResult<u64> {
        let mut inner = self.inner.write();
        inner.booking_seq += 1;
        Ok(inner.booking_seq)
    }

    fn insert_booking(&self, mut booking: Booking) -> RepoResult<Booking> {
        let mut inner = self.inner.write();
        inner.next_booking_id += 1;
        booking.id = inner.next_booking_id;
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    fn update_booking(&self, booking: &Booking) -> RepoResult<()> {
        let mut inner = self.inner.write();
        if !inner.bookings.contains_key(&booking.id) {
            return Err(RepoError::NotFound(format!("Booking {}", booking.id)));
        }
        inner.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    fn find_booking(&self, id: i64) -> RepoResult<Option<Booking>> {
        Ok(self.inner.read().bookings.get(&id).cloned())
    }

    fn find_overlapping(
        &self,
        table_id: i64,
        range: &TimeRange,
        exclude: Option<i64>,
    ) -> RepoResult<Vec<Booking>> {
        let inner = self.inner.read();
        let mut found: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| Some(b.id) != exclude)
            .filter(|b| b.covers_table(table_id))
            .filter(|b| b.range.overlaps(range))
            .cloned()
            .collect();
        found.sort_by_key(|b| b.range.start_at);
        Ok(found)
    }

    fn list_bookings_for_floor(
        &self,
        floor_id: i64,
        range: Option<&TimeRange>,
    ) -> RepoResult<Vec<Booking>> {
        let inner = self.inner.read();
        let floor_tables: Vec<i64> = inner
            .tables
            .values()
            .filter(|t| t.floor_id == floor_id)
            .map(|t| t.id)
            .collect();

        let mut found: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.status.is_active())
            .filter(|b| b.table_ids.iter().any(|id| floor_tables.contains(id)))
            .filter(|b| range.is_none_or(|r| b.range.overlaps(r)))
            .cloned()
            .collect();
        found.sort_by_key(|b| b.range.start_at);
        Ok(found)
    }

    fn find_branch(&self, id: i64) -> RepoResult<Option<Branch>> {
        Ok(self.inner.read().branches.get(&id).cloned())
    }

    fn find_floor(&self, id: i64) -> RepoResult<Option<Floor>> {
        Ok(self.inner.read().floors.get(&id).cloned())
    }

    fn find_table(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        Ok(self.inner.read().tables.get(&id).cloned())
    }

    fn list_tables_for_floor(&self, floor_id: i64) -> RepoResult<Vec<DiningTable>> {
        let inner = self.inner.read();
        let mut tables: Vec<DiningTable> = inner
            .tables
            .values()
            .filter(|t| t.floor_id == floor_id)
            .cloned()
            .collect();
        tables.sort_by_key(|t| t.id);
        Ok(tables)
    }

    fn set_table_status(&self, id: i64, status: TableStatus) -> RepoResult<()> {
        let mut inner = self.inner.write();
        let table = inner
            .tables
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Table {}", id)))?;
        table.status = status;
        Ok(())
    }
}
