//! Body registry - insertion-ordered bookkeeping of live bodies
//!
//! Pure bookkeeping, no engine calls. Clients match Step response rows to
//! prior knowledge by identifier position, so the registry must preserve
//! exact submission order; records live in a `Vec`, never an id-sorted
//! structure.

use kinetic_physics::{BodyShape, MotionType};
use thiserror::Error;

/// Reserved identifier for the implicit static floor body
pub const FLOOR_ID: u32 = u32::MAX;

/// Registry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Identifier already present
    #[error("Body id already registered: {0}")]
    Duplicate(u32),

    /// Identifier not present
    #[error("Body id not registered: {0}")]
    NotFound(u32),
}

/// Static metadata for one tracked body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRecord {
    /// Body identifier (caller-supplied for actors, [`FLOOR_ID`] for the floor)
    pub id: u32,
    /// Collision shape
    pub shape: BodyShape,
    /// Motion kind
    pub motion: MotionType,
    /// Initial position (orientation defaults to identity)
    pub position: [f32; 3],
}

/// Insertion-ordered set of live body records
#[derive(Debug, Default)]
pub struct BodyRegistry {
    records: Vec<BodyRecord>,
}

impl BodyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body; fails if the identifier is already present
    pub fn add(&mut self, record: BodyRecord) -> Result<(), RegistryError> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(RegistryError::Duplicate(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Remove a body; fails if the identifier is not present
    pub fn remove(&mut self, id: u32) -> Result<BodyRecord, RegistryError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        Ok(self.records.remove(index))
    }

    /// Look up a record by identifier
    pub fn get(&self, id: u32) -> Option<&BodyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Actor identifiers in insertion order, excluding the floor
    pub fn actor_ids(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(|r| r.id)
            .filter(|&id| id != FLOOR_ID)
            .collect()
    }

    /// Iterate all records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &BodyRecord> {
        self.records.iter()
    }

    /// Number of tracked bodies (floor included)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records. Does not release engine resources; that is the
    /// orchestrator's job.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
