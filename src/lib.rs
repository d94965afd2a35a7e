//! Huddle: group availability aggregation and appointment confirmation.
//!
//! The scheduling engine behind a study-group organizer. Members record the
//! weekly time ranges they cannot meet; the engine derives the windows where
//! every member is simultaneously free; a group administrator converts one
//! of those windows into a confirmed, collision-free appointment.
//!
//! The engine reasons over a fixed, timezone-naive weekly grid (by default
//! 09:00-21:00 at 30-minute cells) and owns only derivation and validation.
//! Group membership and roles come from a [`MembershipProvider`]; persistence
//! is a [`GroupStore`] document-store collaborator, with
//! [`EmbeddedGroupStore`] as the in-memory/JSON reference implementation.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokio::sync::RwLock;
//! use huddle::{
//!     Day, EmbeddedGroupStore, GroupMember, Interval, Scheduler,
//!     StaticMembership, TimePoint,
//! };
//!
//! let membership = StaticMembership::new();
//! membership.add_member("rust-study", GroupMember::admin("alice"));
//! membership.add_member("rust-study", GroupMember::new("bob"));
//!
//! let store = Arc::new(RwLock::new(EmbeddedGroupStore::new()));
//! let scheduler = Scheduler::new(store, Arc::new(membership));
//!
//! // Members record when they cannot meet
//! let blocked = Interval::new(
//!     Day::Monday,
//!     TimePoint::parse("10:00")?,
//!     TimePoint::parse("12:00")?,
//! );
//! scheduler.add_unavailability("rust-study", "bob", blocked).await?;
//!
//! // Once everyone has submitted, the admin computes common free windows
//! let status = scheduler.submission_status("rust-study").await?;
//! if status.all_submitted {
//!     let days = scheduler.compute_free_windows("rust-study").await?;
//!     let window = days[0].available_blocks[0];
//!     scheduler
//!         .confirm_appointment("rust-study", &window, "Kickoff", "alice")
//!         .await?;
//! }
//! ```

pub mod appointments;
pub mod availability;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod membership;
pub mod storage;

pub use appointments::{Appointment, AppointmentManager};
pub use availability::{
    compute_free_windows, submission_status, AvailabilityManager, DayAvailability, FreeWindow,
    GroupScheduleStats, Interval, MemberAvailabilityRecord, SubmissionStatus,
};
pub use config::ScheduleConfig;
pub use engine::Scheduler;
pub use error::{
    AppointmentError, AvailabilityError, ConfigError, GridError, HuddleError, Result, StorageError,
};
pub use grid::{Day, TimeGrid, TimePoint};
pub use membership::{GroupMember, MemberRole, MembershipProvider, StaticMembership};
pub use storage::{EmbeddedGroupStore, GroupStore};
