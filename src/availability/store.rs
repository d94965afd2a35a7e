//! Member unavailability management.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AvailabilityError, Result};
use crate::grid::TimeGrid;
use crate::storage::GroupStore;

use super::types::{Interval, MemberAvailabilityRecord};

/// Manager for member unavailability entries, validating against the grid
/// and mirroring every mutation to the group store.
pub struct AvailabilityManager<S: GroupStore> {
    store: Arc<RwLock<S>>,
    grid: TimeGrid,
}

impl<S: GroupStore> AvailabilityManager<S> {
    /// Create a manager over a shared store.
    pub fn new(store: Arc<RwLock<S>>, grid: TimeGrid) -> Self {
        Self { store, grid }
    }

    /// Record a blocked range for a member and return its index.
    ///
    /// Fails if the range is inverted or empty, if either endpoint is off
    /// the grid, or if the member already holds the identical interval
    /// (exact `(day, start, end)` match, not overlap).
    pub async fn add_interval(
        &self,
        group_id: &str,
        member_id: &str,
        interval: Interval,
    ) -> Result<usize> {
        if interval.start >= interval.end {
            return Err(AvailabilityError::InvalidRange {
                start: interval.start,
                end: interval.end,
            }
            .into());
        }
        self.grid.validate_point(interval.start)?;
        self.grid.validate_point(interval.end)?;

        // Write lock spans the read-modify-write so duplicate checks run
        // against the state being committed.
        let store = self.store.write().await;
        let mut intervals = store.member_intervals(group_id, member_id).await?;

        if intervals.contains(&interval) {
            return Err(AvailabilityError::DuplicateInterval {
                day: interval.day,
                start: interval.start,
                end: interval.end,
            }
            .into());
        }

        intervals.push(interval);
        let index = intervals.len() - 1;
        store
            .put_member_intervals(group_id, member_id, intervals)
            .await?;

        debug!(
            "Added unavailability for {} in {}: {} {}-{}",
            member_id, group_id, interval.day, interval.start, interval.end
        );
        Ok(index)
    }

    /// Remove a member's blocked range by index. Returns the removed
    /// interval.
    pub async fn remove_interval(
        &self,
        group_id: &str,
        member_id: &str,
        index: usize,
    ) -> Result<Interval> {
        let store = self.store.write().await;
        let mut intervals = store.member_intervals(group_id, member_id).await?;

        if index >= intervals.len() {
            return Err(AvailabilityError::EntryNotFound {
                member_id: member_id.to_string(),
                index,
            }
            .into());
        }

        let removed = intervals.remove(index);
        store
            .put_member_intervals(group_id, member_id, intervals)
            .await?;

        debug!(
            "Removed unavailability for {} in {}: {} {}-{}",
            member_id, group_id, removed.day, removed.start, removed.end
        );
        Ok(removed)
    }

    /// A member's blocked ranges in insertion order (display only;
    /// aggregation does not depend on order).
    pub async fn list_intervals(&self, group_id: &str, member_id: &str) -> Result<Vec<Interval>> {
        let store = self.store.read().await;
        store.member_intervals(group_id, member_id).await
    }

    /// Drop a member's whole record (member left the group).
    pub async fn remove_member(&self, group_id: &str, member_id: &str) -> Result<bool> {
        let store = self.store.write().await;
        let removed = store.delete_member_intervals(group_id, member_id).await?;
        if removed {
            debug!("Dropped unavailability record for {} in {}", member_id, group_id);
        }
        Ok(removed)
    }

    /// Snapshot of all availability records for a group.
    pub async fn records(&self, group_id: &str) -> Result<Vec<MemberAvailabilityRecord>> {
        let store = self.store.read().await;
        store.availability_records(group_id).await
    }

    /// The grid this manager validates against.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }
}
