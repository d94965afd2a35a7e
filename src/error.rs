//! Error types for the huddle scheduling engine.

use thiserror::Error;

use crate::grid::{Day, TimePoint};

/// Main error type for huddle operations.
#[derive(Error, Debug)]
pub enum HuddleError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Availability error: {0}")]
    Availability(#[from] AvailabilityError),

    #[error("Appointment error: {0}")]
    Appointment(#[from] AppointmentError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Time-grid validation errors.
///
/// Raised when a day label or interval does not fit the discretized weekly
/// grid.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Unrecognized day label: {0}")]
    UnknownDay(String),

    #[error("Unparsable time: {0} (expected zero-padded HH:MM)")]
    UnparsableTime(String),

    #[error("Time {0} is not aligned to the {1}-minute grid")]
    Misaligned(TimePoint, u16),

    #[error("Time {time} is outside the daily window {window_start}-{window_end}")]
    OutOfWindow {
        time: TimePoint,
        window_start: TimePoint,
        window_end: TimePoint,
    },
}

/// Unavailability-store errors.
#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Invalid range: start {start} must be before end {end}")]
    InvalidRange { start: TimePoint, end: TimePoint },

    #[error("Duplicate interval: {day} {start}-{end} already recorded for this member")]
    DuplicateInterval {
        day: Day,
        start: TimePoint,
        end: TimePoint,
    },

    #[error("No unavailability entry at index {index} for member {member_id}")]
    EntryNotFound { member_id: String, index: usize },
}

/// Appointment confirmation errors.
#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Member {0} is not an administrator of this group")]
    PermissionDenied(String),

    #[error("Appointment title must not be blank")]
    EmptyTitle,

    #[error("Slot {day} {start}-{end} overlaps an already confirmed appointment")]
    SlotAlreadyConfirmed {
        day: Day,
        start: TimePoint,
        end: TimePoint,
    },

    #[error("Appointment not found: {0}")]
    NotFound(String),
}

/// Storage-related errors.
///
/// Persistence failures surface unchanged; callers treat them as
/// transient-retryable.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for huddle operations.
pub type Result<T> = std::result::Result<T, HuddleError>;
