//! Group schedule storage trait and embedded implementation.
//!
//! The engine does not own persistence mechanics; it talks to a document
//! store keyed by group id that holds each member's unavailability intervals
//! and the group's confirmed appointments. [`EmbeddedGroupStore`] is the
//! in-memory reference implementation with optional JSON file persistence.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex as AsyncMutex, RwLock};

use crate::appointments::Appointment;
use crate::availability::{Interval, MemberAvailabilityRecord};
use crate::error::{HuddleError, Result, StorageError};

// ============================================================================
// GroupStore Trait
// ============================================================================

/// Trait for group schedule storage backends.
///
/// Each group holds `unavailability[member_id] -> [Interval]` and a list of
/// confirmed appointments. All operations are scoped to one group; unknown
/// groups read as empty.
#[async_trait]
pub trait GroupStore: Send + Sync {
    // ========================================================================
    // Unavailability Operations
    // ========================================================================

    /// Get a member's unavailability intervals, in insertion order.
    async fn member_intervals(&self, group_id: &str, member_id: &str) -> Result<Vec<Interval>>;

    /// Replace a member's unavailability intervals wholesale.
    async fn put_member_intervals(
        &self,
        group_id: &str,
        member_id: &str,
        intervals: Vec<Interval>,
    ) -> Result<()>;

    /// Remove a member's unavailability record entirely (member left the
    /// group). Returns whether a record existed.
    async fn delete_member_intervals(&self, group_id: &str, member_id: &str) -> Result<bool>;

    /// All availability records for a group, sorted by member id.
    async fn availability_records(&self, group_id: &str) -> Result<Vec<MemberAvailabilityRecord>>;

    // ========================================================================
    // Appointment Operations
    // ========================================================================

    /// All confirmed appointments for a group.
    async fn appointments(&self, group_id: &str) -> Result<Vec<Appointment>>;

    /// Append a confirmed appointment.
    async fn insert_appointment(
        &self,
        group_id: &str,
        appointment: Appointment,
    ) -> Result<Appointment>;

    /// Remove an appointment by id. Returns whether it existed.
    async fn remove_appointment(&self, group_id: &str, appointment_id: &str) -> Result<bool>;

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop all data held for a group.
    async fn clear_group(&self, group_id: &str) -> Result<()>;
}

// ============================================================================
// Internal Data Structure
// ============================================================================

/// Per-group stored document.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct GroupDocument {
    /// Member id -> blocked intervals in insertion order.
    unavailability: HashMap<String, Vec<Interval>>,
    /// Confirmed appointments.
    appointments: Vec<Appointment>,
}

#[derive(Debug, Default)]
struct StoreData {
    groups: HashMap<String, GroupDocument>,
}

// ============================================================================
// Embedded Implementation
// ============================================================================

/// In-memory group store with optional persistence.
///
/// Data lives behind a single `RwLock` for consistent reads; when a
/// persistence path is configured every mutation is flushed to a JSON file,
/// written to a temp file and renamed for atomicity.
pub struct EmbeddedGroupStore {
    data: RwLock<StoreData>,
    persistence_path: Option<std::path::PathBuf>,
    persist_lock: AsyncMutex<()>,
}

impl EmbeddedGroupStore {
    /// Create a new in-memory store without persistence.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            persistence_path: None,
            persist_lock: AsyncMutex::new(()),
        }
    }

    /// Create a store persisted under `data_dir`, loading existing data.
    pub async fn with_persistence(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir).map_err(StorageError::Io)?;

        let persistence_path = data_dir.join("schedule.json");
        let store = Self {
            data: RwLock::new(StoreData::default()),
            persistence_path: Some(persistence_path.clone()),
            persist_lock: AsyncMutex::new(()),
        };

        if persistence_path.exists() {
            store.load_from_file(&persistence_path).await?;
        }

        Ok(store)
    }

    /// Load store contents from a JSON file.
    async fn load_from_file(&self, path: &Path) -> Result<()> {
        let content = tokio::fs::read_to_string(path).await.map_err(HuddleError::Io)?;

        let persisted: PersistenceData =
            serde_json::from_str(&content).map_err(HuddleError::Serialization)?;

        let mut data = self.data.write().await;
        data.groups = persisted.groups;

        tracing::info!(
            "Loaded schedules for {} groups from {}",
            data.groups.len(),
            path.display()
        );

        Ok(())
    }

    /// Persist data to file if persistence is enabled.
    async fn persist(&self) -> Result<()> {
        let Some(ref path) = self.persistence_path else {
            return Ok(());
        };

        let _lock = self.persist_lock.lock().await;

        let data = self.data.read().await;
        let persisted = PersistenceData {
            version: 1,
            groups: data.groups.clone(),
        };
        drop(data);

        let content =
            serde_json::to_string_pretty(&persisted).map_err(HuddleError::Serialization)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(HuddleError::Io)?;
        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(HuddleError::Io)?;

        Ok(())
    }
}

impl Default for EmbeddedGroupStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupStore for EmbeddedGroupStore {
    async fn member_intervals(&self, group_id: &str, member_id: &str) -> Result<Vec<Interval>> {
        let data = self.data.read().await;
        Ok(data
            .groups
            .get(group_id)
            .and_then(|g| g.unavailability.get(member_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn put_member_intervals(
        &self,
        group_id: &str,
        member_id: &str,
        intervals: Vec<Interval>,
    ) -> Result<()> {
        let mut data = self.data.write().await;
        let group = data.groups.entry(group_id.to_string()).or_default();
        group
            .unavailability
            .insert(member_id.to_string(), intervals);

        drop(data);
        self.persist().await?;
        Ok(())
    }

    async fn delete_member_intervals(&self, group_id: &str, member_id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let removed = data
            .groups
            .get_mut(group_id)
            .is_some_and(|g| g.unavailability.remove(member_id).is_some());

        drop(data);
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    async fn availability_records(&self, group_id: &str) -> Result<Vec<MemberAvailabilityRecord>> {
        let data = self.data.read().await;

        let mut records: Vec<MemberAvailabilityRecord> = data
            .groups
            .get(group_id)
            .map(|g| {
                g.unavailability
                    .iter()
                    .map(|(member_id, intervals)| {
                        MemberAvailabilityRecord::new(member_id.clone(), intervals.clone())
                    })
                    .collect()
            })
            .unwrap_or_default();

        records.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        Ok(records)
    }

    async fn appointments(&self, group_id: &str) -> Result<Vec<Appointment>> {
        let data = self.data.read().await;
        Ok(data
            .groups
            .get(group_id)
            .map(|g| g.appointments.clone())
            .unwrap_or_default())
    }

    async fn insert_appointment(
        &self,
        group_id: &str,
        appointment: Appointment,
    ) -> Result<Appointment> {
        let mut data = self.data.write().await;
        data.groups
            .entry(group_id.to_string())
            .or_default()
            .appointments
            .push(appointment.clone());

        drop(data);
        self.persist().await?;
        Ok(appointment)
    }

    async fn remove_appointment(&self, group_id: &str, appointment_id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let removed = match data.groups.get_mut(group_id) {
            Some(group) => {
                let before = group.appointments.len();
                group.appointments.retain(|a| a.id != appointment_id);
                group.appointments.len() != before
            }
            None => false,
        };

        drop(data);
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    async fn clear_group(&self, group_id: &str) -> Result<()> {
        let mut data = self.data.write().await;
        data.groups.remove(group_id);

        drop(data);
        self.persist().await?;
        Ok(())
    }
}

// ============================================================================
// Persistence Data Structure
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct PersistenceData {
    version: u32,
    groups: HashMap<String, GroupDocument>,
}

// ============================================================================
// Tests
// ============================================================================
