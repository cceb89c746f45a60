//! Dataset validation.

use std::fs;
use std::path::Path;

use bl_core::WorldDataset;

/// Parse and validate a dataset file, printing a one-line summary.
pub fn run(data: &Path) -> Result<(), String> {
    let text =
        fs::read_to_string(data).map_err(|e| format!("cannot read {}: {e}", data.display()))?;
    let dataset = WorldDataset::from_json(&text).map_err(|e| e.to_string())?;

    println!(
        "ok: {} ({} rooms, {} items, {} treasures)",
        dataset.name(),
        dataset.rooms().count(),
        dataset.items().count(),
        dataset.treasures().count()
    );
    Ok(())
}
