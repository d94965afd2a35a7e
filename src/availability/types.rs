//! Types for member unavailability and derived free windows.

use serde::{Deserialize, Serialize};

use crate::grid::{Day, TimePoint};

// ============================================================================
// Intervals
// ============================================================================

/// A half-open `[start, end)` span on one day of the weekly grid.
///
/// An unavailability entry carries no metadata beyond its interval, so
/// member records hold `Interval` values directly, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Interval {
    /// Day the span falls on.
    pub day: Day,
    /// Inclusive start.
    pub start: TimePoint,
    /// Exclusive end.
    pub end: TimePoint,
}

impl Interval {
    /// Create an interval. Range and grid validation happen at the store
    /// boundary, not here.
    pub fn new(day: Day, start: TimePoint, end: TimePoint) -> Self {
        Self { day, start, end }
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }

    /// Whether two intervals overlap: same day and
    /// `self.start < other.end && other.start < self.end`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Whether the grid cell starting at `cell_start` (one granularity step
    /// wide) falls within this interval. Because intervals are grid-aligned,
    /// a cell is covered exactly when its start point is.
    pub fn covers_cell(&self, day: Day, cell_start: TimePoint) -> bool {
        self.day == day && self.start <= cell_start && cell_start < self.end
    }
}

/// One group member's complete unavailability input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MemberAvailabilityRecord {
    /// Identifier of the member.
    pub member_id: String,
    /// Blocked spans, in insertion order.
    pub unavailable: Vec<Interval>,
}

impl MemberAvailabilityRecord {
    /// Create a record.
    pub fn new(member_id: impl Into<String>, unavailable: Vec<Interval>) -> Self {
        Self {
            member_id: member_id.into(),
            unavailable,
        }
    }

    /// A member has submitted once their record holds at least one entry.
    pub fn has_submitted(&self) -> bool {
        !self.unavailable.is_empty()
    }
}

// ============================================================================
// Derived output
// ============================================================================

/// A maximal contiguous span where no member is unavailable.
///
/// Derived and ephemeral: recomputed on demand, never persisted, always
/// replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FreeWindow {
    /// Day the window falls on.
    pub day: Day,
    /// Inclusive start.
    pub start: TimePoint,
    /// Exclusive end.
    pub end: TimePoint,
    /// Duration in minutes.
    pub duration_minutes: u16,
}

impl FreeWindow {
    /// Create a free window.
    pub fn new(day: Day, start: TimePoint, end: TimePoint) -> Self {
        Self {
            day,
            start,
            end,
            duration_minutes: start.minutes_until(end),
        }
    }
}

/// All surviving free windows for one day.
///
/// Days with no surviving windows are omitted from aggregation output
/// entirely rather than reported with an empty block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DayAvailability {
    /// Day the blocks fall on.
    pub day: Day,
    /// Free windows in ascending start order.
    pub available_blocks: Vec<FreeWindow>,
}

// ============================================================================
// Readiness
// ============================================================================

/// Submission progress for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SubmissionStatus {
    /// Members with at least one unavailability entry.
    pub submitted: usize,
    /// Total members in the group.
    pub total: usize,
    /// Rounded percentage, 0 for an empty group.
    pub percentage: u8,
    /// Whether the rounded percentage reached 100.
    pub all_submitted: bool,
}

/// Summary counters for one group's schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GroupScheduleStats {
    /// Total members in the group.
    pub member_count: usize,
    /// Members that have submitted unavailability.
    pub submitted_count: usize,
    /// Confirmed appointments.
    pub appointment_count: usize,
    /// Free windows currently on offer.
    pub free_window_count: usize,
    /// Total free minutes across all offered windows.
    pub total_free_minutes: u32,
}
