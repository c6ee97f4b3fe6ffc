//! Repository Module
//!
//! Narrow storage contract the engine requires from a durable store.
//! The engine is the single logical writer above this interface; it
//! serializes conflicting operations per table before calling in.
//!
//! Horizontal scaling note: the in-process lock registry only protects one
//! engine instance. Running several engine instances against one store
//! requires the implementation itself to uphold the check-then-write
//! serialization (unique constraint or row lock keyed by table + interval);
//! [`memory::InMemoryRepository`] does not, and is intended for a single
//! process.

pub mod memory;

pub use memory::InMemoryRepository;

use shared::error::AppError;
use shared::models::{Booking, Branch, DiningTable, Floor, TableStatus};
use shared::types::TimeRange;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Storage(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Durable storage of bookings and tables
///
/// Implementations must be safe to call from multiple threads; reads may
/// return a momentarily stale view, writes must be individually atomic.
pub trait ReservationRepository: Send + Sync {
    // ==================== Bookings ====================

    /// Next value of the monotonically increasing booking counter
    /// (used for human-facing booking codes)
    fn next_booking_seq(&self) -> RepoResult<u64>;

    /// Persist a new booking; the repository assigns the numeric id
    fn insert_booking(&self, booking: Booking) -> RepoResult<Booking>;

    /// Overwrite an existing booking
    fn update_booking(&self, booking: &Booking) -> RepoResult<()>;

    fn find_booking(&self, id: i64) -> RepoResult<Option<Booking>>;

    /// All bookings claiming `table_id` whose interval overlaps `range`,
    /// regardless of status, optionally excluding one booking id
    fn find_overlapping(
        &self,
        table_id: i64,
        range: &TimeRange,
        exclude: Option<i64>,
    ) -> RepoResult<Vec<Booking>>;

    /// Active (reserved / checked-in) bookings touching any table of the
    /// floor, optionally restricted to an interval
    fn list_bookings_for_floor(
        &self,
        floor_id: i64,
        range: Option<&TimeRange>,
    ) -> RepoResult<Vec<Booking>>;

    // ==================== Branches / Floors / Tables ====================

    fn find_branch(&self, id: i64) -> RepoResult<Option<Branch>>;

    fn find_floor(&self, id: i64) -> RepoResult<Option<Floor>>;

    fn find_table(&self, id: i64) -> RepoResult<Option<DiningTable>>;

    fn list_tables_for_floor(&self, floor_id: i64) -> RepoResult<Vec<DiningTable>>;

    fn set_table_status(&self, id: i64, status: TableStatus) -> RepoResult<()>;
}
