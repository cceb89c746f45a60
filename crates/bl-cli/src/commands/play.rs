//! The interactive play loop: stdin lines in, narration out.

use std::io::{self, BufRead, Write};
use std::path::Path;

use bl_engine::{GameConfig, GameSession};

use crate::commands::load_dataset;
use crate::slot::FileSlot;

/// Run the game until the player quits or stdin closes.
pub fn run(data: Option<&Path>, seed: u64, save: &Path) -> Result<(), String> {
    let dataset = load_dataset(data)?;
    let config = GameConfig::new().with_seed(seed);
    let mut session = GameSession::with_gateway(dataset, config, Box::new(FileSlot::new(save)));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", session.intro()).map_err(|e| e.to_string())?;

    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        writeln!(out, "\n> {line}").map_err(|e| e.to_string())?;
        writeln!(out, "{}", session.process(&line)).map_err(|e| e.to_string())?;
        if session.is_over() {
            break;
        }
    }
    Ok(())
}
