//! Appointment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::FreeWindow;
use crate::grid::{Day, TimePoint};

/// A confirmed, persisted appointment.
///
/// Created only by a group administrator from an offered free window.
/// Permanent once created except for explicit admin deletion: later
/// unavailability input never invalidates an existing appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Appointment {
    /// Unique identifier.
    pub id: String,
    /// Appointment title.
    pub title: String,
    /// Day the appointment falls on.
    pub day: Day,
    /// Inclusive start.
    pub start: TimePoint,
    /// Exclusive end.
    pub end: TimePoint,
    /// When the appointment was confirmed.
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Create an appointment with a fresh id and the current timestamp.
    pub fn new(title: impl Into<String>, day: Day, start: TimePoint, end: TimePoint) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            day,
            start,
            end,
            created_at: Utc::now(),
        }
    }

    /// Create an appointment covering a free window.
    pub fn from_window(title: impl Into<String>, window: &FreeWindow) -> Self {
        Self::new(title, window.day, window.start, window.end)
    }

    /// Whether this appointment overlaps the given span:
    /// same day and `self.start < end && start < self.end`.
    pub fn overlaps(&self, day: Day, start: TimePoint, end: TimePoint) -> bool {
        self.day == day && self.start < end && start < self.end
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }
}
