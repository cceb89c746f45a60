//! CLI subcommands.

pub mod check;
pub mod play;

use std::fs;
use std::path::Path;

use bl_core::WorldDataset;

/// Load a dataset from a file, or fall back to the built-in world.
pub fn load_dataset(path: Option<&Path>) -> Result<WorldDataset, String> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            WorldDataset::from_json(&text).map_err(|e| e.to_string())
        }
        None => WorldDataset::builtin().map_err(|e| e.to_string()),
    }
}
