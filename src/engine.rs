//! The caller-facing scheduling surface.
//!
//! [`Scheduler`] composes the availability and appointment managers over one
//! shared store and exposes the operations a scheduling UI consumes:
//! recording unavailability, computing common free windows, submission
//! status, and appointment confirmation.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::appointments::{Appointment, AppointmentManager};
use crate::availability::{
    compute_free_windows, submission_status, AvailabilityManager, DayAvailability,
    GroupScheduleStats, Interval, SubmissionStatus,
};
use crate::config::ScheduleConfig;
use crate::error::Result;
use crate::grid::{Day, TimeGrid, TimePoint};
use crate::membership::MembershipProvider;
use crate::storage::GroupStore;

/// The scheduling engine for study groups.
///
/// Aggregation reads an immutable snapshot of the group's records and is a
/// pure function thereafter, so `compute_free_windows` may be called by any
/// number of concurrent readers. Mutations go through the managers, which
/// re-validate against the authoritative store at commit time.
pub struct Scheduler<S: GroupStore> {
    availability: AvailabilityManager<S>,
    appointments: AppointmentManager<S>,
    membership: Arc<dyn MembershipProvider>,
    grid: TimeGrid,
    min_window_minutes: u16,
}

impl<S: GroupStore> Scheduler<S> {
    /// Create a scheduler with the default grid (09:00-21:00, 30-minute
    /// cells, 60-minute minimum window).
    pub fn new(store: Arc<RwLock<S>>, membership: Arc<dyn MembershipProvider>) -> Self {
        Self::with_config(store, membership, &ScheduleConfig::default())
    }

    /// Create a scheduler from a validated configuration.
    pub fn with_config(
        store: Arc<RwLock<S>>,
        membership: Arc<dyn MembershipProvider>,
        config: &ScheduleConfig,
    ) -> Self {
        let grid = config.grid();
        Self {
            availability: AvailabilityManager::new(store.clone(), grid),
            appointments: AppointmentManager::new(store, membership.clone()),
            membership,
            grid,
            min_window_minutes: config.min_window_minutes,
        }
    }

    // ========================================================================
    // Unavailability
    // ========================================================================

    /// Record a blocked range for a member; returns the entry's index.
    pub async fn add_unavailability(
        &self,
        group_id: &str,
        member_id: &str,
        interval: Interval,
    ) -> Result<usize> {
        self.availability
            .add_interval(group_id, member_id, interval)
            .await
    }

    /// Remove a member's blocked range by index.
    pub async fn remove_unavailability(
        &self,
        group_id: &str,
        member_id: &str,
        index: usize,
    ) -> Result<Interval> {
        self.availability
            .remove_interval(group_id, member_id, index)
            .await
    }

    /// A member's blocked ranges in insertion order.
    pub async fn list_unavailability(
        &self,
        group_id: &str,
        member_id: &str,
    ) -> Result<Vec<Interval>> {
        self.availability.list_intervals(group_id, member_id).await
    }

    /// Drop a departed member's whole unavailability record.
    pub async fn remove_member_unavailability(
        &self,
        group_id: &str,
        member_id: &str,
    ) -> Result<bool> {
        self.availability.remove_member(group_id, member_id).await
    }

    // ========================================================================
    // Aggregation and readiness
    // ========================================================================

    /// Compute the group's common free windows, per day.
    ///
    /// Days with no window of at least the minimum duration are omitted.
    /// Deterministic and side-effect free for a given store state.
    pub async fn compute_free_windows(&self, group_id: &str) -> Result<Vec<DayAvailability>> {
        let records = self.availability.records(group_id).await?;
        Ok(compute_free_windows(
            &self.grid,
            &records,
            self.min_window_minutes,
        ))
    }

    /// Submission progress for the group.
    ///
    /// The caller gates the admin-facing aggregation trigger on
    /// `all_submitted`; aggregation itself runs regardless.
    pub async fn submission_status(&self, group_id: &str) -> Result<SubmissionStatus> {
        let members = self.membership.list_members(group_id).await?;
        let records = self.availability.records(group_id).await?;
        Ok(submission_status(&members, &records))
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Confirm a free window as an appointment (admin only).
    pub async fn confirm_appointment(
        &self,
        group_id: &str,
        window: &crate::availability::FreeWindow,
        title: &str,
        actor_id: &str,
    ) -> Result<Appointment> {
        self.appointments
            .confirm(group_id, window, title, actor_id)
            .await
    }

    /// Delete an appointment (admin only).
    pub async fn delete_appointment(
        &self,
        group_id: &str,
        appointment_id: &str,
        actor_id: &str,
    ) -> Result<()> {
        self.appointments
            .delete(group_id, appointment_id, actor_id)
            .await
    }

    /// Whether a span is already covered by a confirmed appointment.
    pub async fn is_confirmed(
        &self,
        group_id: &str,
        day: Day,
        start: TimePoint,
        end: TimePoint,
    ) -> Result<bool> {
        self.appointments.is_confirmed(group_id, day, start, end).await
    }

    /// All appointments for a group, in week order then ascending start.
    pub async fn list_appointments(&self, group_id: &str) -> Result<Vec<Appointment>> {
        self.appointments.list(group_id).await
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Summary counters for a group's schedule.
    pub async fn stats(&self, group_id: &str) -> Result<GroupScheduleStats> {
        let members = self.membership.list_members(group_id).await?;
        let records = self.availability.records(group_id).await?;
        let appointments = self.appointments.list(group_id).await?;
        let free = compute_free_windows(&self.grid, &records, self.min_window_minutes);

        let status = submission_status(&members, &records);
        let free_window_count = free.iter().map(|d| d.available_blocks.len()).sum();
        let total_free_minutes = free
            .iter()
            .flat_map(|d| d.available_blocks.iter())
            .map(|w| w.duration_minutes as u32)
            .sum();

        Ok(GroupScheduleStats {
            member_count: status.total,
            submitted_count: status.submitted,
            appointment_count: appointments.len(),
            free_window_count,
            total_free_minutes,
        })
    }

    /// The grid this scheduler validates and aggregates against.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }
}
