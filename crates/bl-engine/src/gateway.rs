//! The persistence boundary.
//!
//! The engine treats saved games as opaque strings in a single unnamed
//! slot. What backs the slot (a file, a browser store, memory) is the
//! host's business.

use crate::error::{EngineError, EngineResult};

/// A single-slot store for serialized world state snapshots.
pub trait SaveGateway {
    /// Overwrite the slot with a snapshot.
    fn save(&mut self, snapshot: &str) -> EngineResult<()>;

    /// Read the slot. [`EngineError::NoSavedGame`] when it is empty.
    fn load(&self) -> EngineResult<String>;
}

/// An in-memory slot, used by tests and as the default gateway.
#[derive(Debug, Default)]
pub struct MemorySlot {
    snapshot: Option<String>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveGateway for MemorySlot {
    fn save(&mut self, snapshot: &str) -> EngineResult<()> {
        self.snapshot = Some(snapshot.to_string());
        Ok(())
    }

    fn load(&self) -> EngineResult<String> {
        self.snapshot.clone().ok_or(EngineError::NoSavedGame)
    }
}
