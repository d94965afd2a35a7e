//! The discretized weekly time grid.
//!
//! The engine reasons over a fixed, timezone-naive weekly template: seven
//! nominal weekday labels and, per day, a sequence of time points spaced at a
//! fixed granularity across a fixed daily window. Days carry no calendar
//! date; time points are zero-padded `HH:MM` values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GridError;

// ============================================================================
// Day
// ============================================================================

/// One of seven canonical weekday labels, used nominally.
///
/// Ordering follows declaration order (`Monday` first), which is the order
/// aggregation results are reported in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days in week order.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Zero-based position within the week (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Day {
    type Err = GridError;

    /// Parse a day label.
    ///
    /// Accepts full English names and three-letter abbreviations,
    /// case-insensitive. Anything else is rejected outright; there is no
    /// prefix or substring guessing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Day::Monday),
            "tuesday" | "tue" => Ok(Day::Tuesday),
            "wednesday" | "wed" => Ok(Day::Wednesday),
            "thursday" | "thu" => Ok(Day::Thursday),
            "friday" | "fri" => Ok(Day::Friday),
            "saturday" | "sat" => Ok(Day::Saturday),
            "sunday" | "sun" => Ok(Day::Sunday),
            _ => Err(GridError::UnknownDay(s.to_string())),
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// TimePoint
// ============================================================================

/// A time of day, stored as minutes since midnight.
///
/// Parsed from and displayed as zero-padded `HH:MM`, so `Ord` on the numeric
/// value agrees with lexicographic order on the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(u16);

impl TimePoint {
    /// Create a time point from minutes since midnight.
    ///
    /// Returns `None` if the value does not fall within a single day.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < 24 * 60 {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Parse a strict zero-padded `HH:MM` string.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();
        if !well_formed {
            return Err(GridError::UnparsableTime(s.to_string()));
        }

        let hours: u16 = s[0..2].parse().map_err(|_| GridError::UnparsableTime(s.to_string()))?;
        let minutes: u16 = s[3..5].parse().map_err(|_| GridError::UnparsableTime(s.to_string()))?;
        if hours >= 24 || minutes >= 60 {
            return Err(GridError::UnparsableTime(s.to_string()));
        }

        Ok(Self(hours * 60 + minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Minutes between this point and a later one.
    pub fn minutes_until(self, later: TimePoint) -> u16 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimePoint {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl schemars::JsonSchema for TimePoint {
    fn schema_name() -> String {
        "TimePoint".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

// ============================================================================
// TimeGrid
// ============================================================================

/// The per-day discretization: a daily window and a fixed granularity.
///
/// The default grid spans 09:00-21:00 at 30-minute steps, which yields 25
/// time points and 24 half-hour cells per day. Every cell is the half-open
/// span between two adjacent points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeGrid {
    /// First time point of the daily window.
    pub window_start: TimePoint,
    /// Last time point of the daily window.
    pub window_end: TimePoint,
    /// Spacing between adjacent time points, in minutes.
    pub granularity_minutes: u16,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            window_start: TimePoint(9 * 60),
            window_end: TimePoint(21 * 60),
            granularity_minutes: 30,
        }
    }
}

impl TimeGrid {
    /// Create a grid over an explicit window.
    ///
    /// The granularity must be non-zero and divide the window span exactly;
    /// invariants beyond that are enforced by [`ScheduleConfig::validate`]
    /// at the configuration boundary.
    ///
    /// [`ScheduleConfig::validate`]: crate::config::ScheduleConfig
    pub fn new(window_start: TimePoint, window_end: TimePoint, granularity_minutes: u16) -> Self {
        Self {
            window_start,
            window_end,
            granularity_minutes,
        }
    }

    /// The ordered sequence of time points for one day.
    ///
    /// Pure and deterministic: both window endpoints are included, so a grid
    /// with `n` cells returns `n + 1` points in strictly increasing order.
    pub fn time_points(&self) -> Vec<TimePoint> {
        let mut points = Vec::new();
        let mut current = self.window_start.0;
        while current <= self.window_end.0 {
            points.push(TimePoint(current));
            current += self.granularity_minutes;
        }
        points
    }

    /// Number of grid cells per day.
    pub fn cell_count(&self) -> usize {
        ((self.window_end.0 - self.window_start.0) / self.granularity_minutes) as usize
    }

    /// Whether a time point lies on the grid (aligned and within the window).
    pub fn is_aligned(&self, t: TimePoint) -> bool {
        t >= self.window_start
            && t <= self.window_end
            && (t.0 - self.window_start.0) % self.granularity_minutes == 0
    }

    /// Validate that both endpoints of an interval are members of the grid.
    pub fn validate_point(&self, t: TimePoint) -> Result<(), GridError> {
        if t < self.window_start || t > self.window_end {
            return Err(GridError::OutOfWindow {
                time: t,
                window_start: self.window_start,
                window_end: self.window_end,
            });
        }
        if (t.0 - self.window_start.0) % self.granularity_minutes != 0 {
            return Err(GridError::Misaligned(t, self.granularity_minutes));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
