//! Overlap conflict detection
//!
//! Two claims on the same table conflict iff their half-open intervals
//! overlap and both bookings are in an active status. Cancelled and
//! completed bookings free their window immediately.

use crate::repository::{RepoResult, ReservationRepository};
use shared::models::Booking;
use shared::types::TimeRange;

/// Active bookings claiming `table_id` over a window that overlaps `range`
///
/// `exclude` skips one booking id, used when re-checking a booking that is
/// being moved so it does not conflict with itself.
pub fn find_conflicts(
    repo: &dyn ReservationRepository,
    table_id: i64,
    range: &TimeRange,
    exclude: Option<i64>,
) -> RepoResult<Vec<Booking>> {
    let overlapping = repo.find_overlapping(table_id, range, exclude)?;
    Ok(overlapping
        .into_iter()
        .filter(|b| b.status.is_active())
        .collect())
}

/// Like [`find_conflicts`] but across several tables, stopping at the
/// first conflicting booking found
pub fn first_conflict(
    repo: &dyn ReservationRepository,
    table_ids: &[i64],
    range: &TimeRange,
    exclude: Option<i64>,
) -> RepoResult<Option<(i64, Booking)>> {
    for &table_id in table_ids {
        if let Some(existing) = find_conflicts(repo, table_id, range, exclude)?.into_iter().next() {
            return Ok(Some((table_id, existing)));
        }
    }
    Ok(None)
}
