//! Member unavailability and common free-window derivation.
//!
//! This module covers three of the engine's concerns:
//!
//! - **Unavailability management**: each member's self-reported blocked
//!   ranges, validated against the time grid ([`AvailabilityManager`])
//! - **Aggregation**: the pure derivation of common free windows from a
//!   snapshot of all records ([`compute_free_windows`])
//! - **Readiness**: whether every member has submitted input yet
//!   ([`submission_status`])

mod aggregate;
mod readiness;
mod store;
pub mod types;

pub use aggregate::compute_free_windows;
pub use readiness::submission_status;
pub use store::AvailabilityManager;
pub use types::{
    DayAvailability, FreeWindow, GroupScheduleStats, Interval, MemberAvailabilityRecord,
    SubmissionStatus,
};
