//! Appointment confirmation and deletion.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::availability::FreeWindow;
use crate::error::{AppointmentError, Result};
use crate::grid::{Day, TimePoint};
use crate::membership::MembershipProvider;
use crate::storage::GroupStore;

use super::types::Appointment;

/// Manager for confirmed appointments.
///
/// Confirmation must never double-book: the overlap check runs against the
/// authoritative appointment list at commit time, under the store's write
/// lock, so a confirmation computed from a stale snapshot still fails
/// cleanly instead of partially applying.
pub struct AppointmentManager<S: GroupStore> {
    store: Arc<RwLock<S>>,
    membership: Arc<dyn MembershipProvider>,
}

impl<S: GroupStore> AppointmentManager<S> {
    /// Create a manager over a shared store and membership collaborator.
    pub fn new(store: Arc<RwLock<S>>, membership: Arc<dyn MembershipProvider>) -> Self {
        Self { store, membership }
    }

    /// Confirm a free window as an appointment.
    ///
    /// Fails if the actor is not a group administrator, if the title is
    /// blank after trimming, or if an existing appointment in the group
    /// overlaps the window.
    pub async fn confirm(
        &self,
        group_id: &str,
        window: &FreeWindow,
        title: &str,
        actor_id: &str,
    ) -> Result<Appointment> {
        if !self.membership.is_admin(group_id, actor_id).await? {
            return Err(AppointmentError::PermissionDenied(actor_id.to_string()).into());
        }

        let title = title.trim();
        if title.is_empty() {
            return Err(AppointmentError::EmptyTitle.into());
        }

        // Write lock held from re-read through insert: the check runs
        // against the state being committed.
        let store = self.store.write().await;
        let existing = store.appointments(group_id).await?;
        if existing
            .iter()
            .any(|a| a.overlaps(window.day, window.start, window.end))
        {
            return Err(AppointmentError::SlotAlreadyConfirmed {
                day: window.day,
                start: window.start,
                end: window.end,
            }
            .into());
        }

        let appointment = Appointment::from_window(title, window);
        let appointment = store.insert_appointment(group_id, appointment).await?;

        debug!(
            "Confirmed appointment '{}' in {}: {} {}-{} ({})",
            appointment.title,
            group_id,
            appointment.day,
            appointment.start,
            appointment.end,
            appointment.id
        );
        Ok(appointment)
    }

    /// Delete an appointment by id.
    ///
    /// Admin only. Its time window becomes eligible to reappear in future
    /// aggregation output; aggregation is recomputed fresh each time.
    pub async fn delete(&self, group_id: &str, appointment_id: &str, actor_id: &str) -> Result<()> {
        if !self.membership.is_admin(group_id, actor_id).await? {
            return Err(AppointmentError::PermissionDenied(actor_id.to_string()).into());
        }

        let store = self.store.write().await;
        if !store.remove_appointment(group_id, appointment_id).await? {
            return Err(AppointmentError::NotFound(appointment_id.to_string()).into());
        }

        debug!("Deleted appointment {} in {}", appointment_id, group_id);
        Ok(())
    }

    /// Whether any confirmed appointment overlaps the given span.
    ///
    /// The caller-facing "already confirmed" query: uses the same overlap
    /// test as [`confirm`], so a window this returns true for can never be
    /// confirmed a second time.
    ///
    /// [`confirm`]: Self::confirm
    pub async fn is_confirmed(
        &self,
        group_id: &str,
        day: Day,
        start: TimePoint,
        end: TimePoint,
    ) -> Result<bool> {
        let store = self.store.read().await;
        let appointments = store.appointments(group_id).await?;
        Ok(appointments.iter().any(|a| a.overlaps(day, start, end)))
    }

    /// All appointments for a group, in week order then ascending start.
    pub async fn list(&self, group_id: &str) -> Result<Vec<Appointment>> {
        let store = self.store.read().await;
        let mut appointments = store.appointments(group_id).await?;
        drop(store);

        appointments.sort_by(|a, b| a.day.cmp(&b.day).then(a.start.cmp(&b.start)));
        Ok(appointments)
    }
}
