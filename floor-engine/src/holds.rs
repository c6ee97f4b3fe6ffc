//! Table hold manager
//!
//! Short-lived exclusive claims a terminal takes on a table while staff
//! finish entering a booking. Holds live only in process memory and expire
//! lazily: every read compares `expires_at` against the injected clock, so
//! no background sweeper is required for correctness.

use crate::clock::Clock;
use chrono::Duration;
use dashmap::DashMap;
use shared::error::{AppError, AppResult};
use shared::models::TableHold;
use std::sync::Arc;
use tracing::debug;

pub struct TableHoldManager {
    holds: DashMap<i64, TableHold>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TableHoldManager {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            holds: DashMap::new(),
            clock,
            ttl,
        }
    }

    /// Acquire (or refresh) a hold on `table_id` for `owner_token`
    ///
    /// Re-acquiring one's own active hold extends it for a full TTL.
    /// An expired hold is treated as absent no matter who owned it.
    pub fn acquire(&self, table_id: i64, owner_token: &str) -> AppResult<TableHold> {
        let now = self.clock.now();
        let mut entry = self.holds.entry(table_id).or_insert_with(|| TableHold {
            table_id,
            owner_token: owner_token.to_string(),
            expires_at: now + self.ttl,
        });

        if entry.is_active(now) && !entry.owned_by(owner_token) {
            return Err(AppError::already_held(table_id));
        }

        entry.owner_token = owner_token.to_string();
        entry.expires_at = now + self.ttl;
        debug!(table_id, owner = owner_token, "table hold acquired");
        Ok(entry.clone())
    }

    /// Release a hold on `table_id`
    ///
    /// Releasing a table that is not held (or whose hold has expired) is a
    /// no-op; releasing another owner's active hold is rejected.
    pub fn release(&self, table_id: i64, owner_token: &str) -> AppResult<()> {
        let now = self.clock.now();
        if let Some(entry) = self.holds.get(&table_id) {
            if entry.is_active(now) && !entry.owned_by(owner_token) {
                return Err(AppError::not_hold_owner(table_id));
            }
        }
        self.holds.remove(&table_id);
        debug!(table_id, owner = owner_token, "table hold released");
        Ok(())
    }

    /// The currently active hold on `table_id`, if any
    pub fn active_hold(&self, table_id: i64) -> Option<TableHold> {
        let now = self.clock.now();
        self.holds
            .get(&table_id)
            .filter(|h| h.is_active(now))
            .map(|h| h.clone())
    }

    /// True iff `table_id` carries an active hold not owned by `owner_token`
    ///
    /// An empty owner token never matches a hold, so callers without a
    /// terminal identity see every active hold as blocking.
    pub fn is_held_by_other(&self, table_id: i64, owner_token: &str) -> bool {
        self.active_hold(table_id)
            .is_some_and(|h| !h.owned_by(owner_token))
    }

    /// Drop the caller's own holds on the given tables (best effort, used
    /// after a booking commits so the tables stop showing as held)
    pub fn release_owned(&self, owner_token: &str, table_ids: &[i64]) {
        for &table_id in table_ids {
            self.holds
                .remove_if(&table_id, |_, h| h.owned_by(owner_token));
        }
    }

    /// Force-remove any hold on `table_id` regardless of owner
    ///
    /// Used when a party checks in: a hold never coexists with an
    /// occupied table, so seating evicts whatever hold is left on it.
    pub fn clear(&self, table_id: i64) {
        self.holds.remove(&table_id);
    }

    /// Remove expired entries; returns how many were dropped
    ///
    /// Purely housekeeping, expiry is already enforced on read.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.holds.len();
        self.holds.retain(|_, h| h.is_active(now));
        before - self.holds.len()
    }
}
