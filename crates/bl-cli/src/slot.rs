//! File-backed save slot.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bl_engine::{EngineError, EngineResult, SaveGateway};

/// On-disk envelope around the engine's opaque snapshot string.
#[derive(Serialize, Deserialize)]
struct SaveFile {
    saved_at: DateTime<Utc>,
    snapshot: String,
}

/// A single save slot stored as a JSON file.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot at the given path. Nothing touches the disk until
    /// the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SaveGateway for FileSlot {
    fn save(&mut self, snapshot: &str) -> EngineResult<()> {
        let envelope = SaveFile {
            saved_at: Utc::now(),
            snapshot: snapshot.to_string(),
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| EngineError::SaveFailed(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| EngineError::SaveFailed(e.to_string()))
    }

    fn load(&self) -> EngineResult<String> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(EngineError::NoSavedGame),
            Err(e) => return Err(EngineError::LoadFailed(e.to_string())),
        };
        let envelope: SaveFile =
            serde_json::from_str(&text).map_err(|e| EngineError::LoadFailed(e.to_string()))?;
        Ok(envelope.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_no_saved_game() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("save.json"));
        assert!(matches!(slot.load(), Err(EngineError::NoSavedGame)));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = FileSlot::new(dir.path().join("save.json"));
        slot.save("{\"x\":1}").unwrap();
        assert_eq!(slot.load().unwrap(), "{\"x\":1}");
    }

    #[test]
    fn corrupt_envelope_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "not json at all").unwrap();
        let slot = FileSlot::new(path);
        assert!(matches!(slot.load(), Err(EngineError::LoadFailed(_))));
    }
}
