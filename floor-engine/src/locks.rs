//! Per-table lock registry
//!
//! Serializes the check-then-write section of every operation that claims
//! table time. A claim over several tables locks them in ascending id
//! order, so two claims over intersecting table sets can never deadlock.

use dashmap::DashMap;
use parking_lot::Mutex;
use parking_lot::lock_api::ArcMutexGuard;
use std::sync::Arc;

type TableGuard = ArcMutexGuard<parking_lot::RawMutex, ()>;

/// Registry of one mutex per table id
///
/// Locks are created lazily on first claim and never removed; the set of
/// tables in a venue is small and stable.
#[derive(Default)]
pub struct TableLockRegistry {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl TableLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, table_id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(table_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Block until every table in the claim is locked by this caller
    ///
    /// Ids are sorted and deduplicated before acquisition; the returned
    /// guard releases all locks on drop.
    pub fn claim(&self, table_ids: &[i64]) -> TableClaimGuard {
        let mut ids: Vec<i64> = table_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let guards = ids
            .iter()
            .map(|&id| self.lock_for(id).lock_arc())
            .collect();
        TableClaimGuard { _guards: guards }
    }
}

/// Holds the per-table locks of one claim until dropped
pub struct TableClaimGuard {
    _guards: Vec<TableGuard>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_claim_excludes_overlapping_claims() {
        let registry = Arc::new(TableLockRegistry::new());
        let in_section = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                let in_section = in_section.clone();
                let max_seen = max_seen.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let _guard = registry.claim(&[1, 2]);
                        let now = in_section.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        in_section.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_opposite_order_claims_do_not_deadlock() {
        let registry = Arc::new(TableLockRegistry::new());

        let a = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for _ in 0..500 {
                    let _guard = registry.claim(&[1, 2, 3]);
                }
            })
        };
        let b = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for _ in 0..500 {
                    let _guard = registry.claim(&[3, 2, 1]);
                }
            })
        };
        a.join().unwrap();
        b.join().unwrap();
    }

    #[test]
    fn test_duplicate_ids_lock_once() {
        let registry = TableLockRegistry::new();
        // would self-deadlock if the duplicate were locked twice
        let _guard = registry.claim(&[5, 5, 5]);
    }
}
