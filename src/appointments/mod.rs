//! Confirmed appointments: creation, collision checks, deletion.

mod manager;
pub mod types;

pub use manager::AppointmentManager;
pub use types::Appointment;
