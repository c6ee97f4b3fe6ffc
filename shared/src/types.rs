//! Common types for the shared crate
//!
//! Utility types used across the engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Half-open time interval `[start_at, end_at)`
///
/// The end instant is excluded, so back-to-back bookings
/// (`[18:00, 19:30)` followed by `[19:30, 21:00)`) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self { start_at, end_at }
    }

    /// A range is valid only when `end_at` is strictly after `start_at`
    pub fn is_valid(&self) -> bool {
        self.end_at > self.start_at
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start_at < other.end_at && other.start_at < self.end_at
    }

    /// True iff `at` falls inside `[start_at, end_at)`
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_at <= at && at < self.end_at
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end_at - self.start_at
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start_at.to_rfc3339(),
            self.end_at.to_rfc3339()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_overlap_partial() {
        let a = TimeRange::new(at(18, 0), at(19, 30));
        let b = TimeRange::new(at(19, 0), at(20, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_containment() {
        let outer = TimeRange::new(at(18, 0), at(22, 0));
        let inner = TimeRange::new(at(19, 0), at(20, 0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_back_to_back_does_not_overlap() {
        let a = TimeRange::new(at(18, 0), at(19, 30));
        let b = TimeRange::new(at(19, 30), at(21, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_does_not_overlap() {
        let a = TimeRange::new(at(12, 0), at(13, 0));
        let b = TimeRange::new(at(15, 0), at(16, 0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = TimeRange::new(at(18, 0), at(19, 30));
        assert!(r.contains(at(18, 0)));
        assert!(r.contains(at(19, 29)));
        assert!(!r.contains(at(19, 30)));
    }

    #[test]
    fn test_validity() {
        assert!(TimeRange::new(at(18, 0), at(18, 1)).is_valid());
        assert!(!TimeRange::new(at(18, 0), at(18, 0)).is_valid());
        assert!(!TimeRange::new(at(19, 0), at(18, 0)).is_valid());
    }
}
