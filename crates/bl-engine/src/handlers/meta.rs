//! Meta commands: look, score, help, and the save/load/restart
//! lifecycle.

use rand::SeedableRng;
use rand::rngs::StdRng;

use bl_core::WorldState;

use crate::error::EngineError;
use crate::narrator::describe_room;
use crate::session::{GameSession, Reply};

const HELP_TEXT: &str = "Some of the commands I understand:\n\
  go <direction> (or just n, s, e, w, up, down, ...)\n\
  take / drop / put <item> in <container> / throw <item>\n\
  open / close / move / unlock / turn / light / tie / wave / give\n\
  look / examine / read / inventory / score / diagnose\n\
  attack <creature> with <weapon>, dig, wait, eat, drink, pray\n\
  again (g) repeats your previous command\n\
  save / restore / restart / quit";

impl GameSession {
    /// Bare "look" re-describes the room; "look <thing>" examines it.
    pub(crate) fn do_look(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::ok(describe_room(&self.data, &self.state));
        }
        self.do_examine(arg)
    }

    pub(crate) fn do_score(&mut self) -> Reply {
        let total: u32 = self
            .data
            .treasures()
            .map(|(_, score)| score.take + score.case)
            .sum();
        Reply::meta(format!(
            "Your score is {} (total of {} points), in {} moves.",
            self.state.score(),
            total,
            self.state.moves()
        ))
    }

    pub(crate) fn do_diagnose(&mut self) -> Reply {
        Reply::meta("You are in perfect health, though the grue population disagrees about how long that will last.")
    }

    pub(crate) fn do_help(&mut self) -> Reply {
        Reply::meta(HELP_TEXT)
    }

    /// Persist the whole state document through the gateway. Gateway
    /// faults degrade to narration, never to an error.
    pub(crate) fn do_save(&mut self) -> Reply {
        let snapshot = match self.state.serialize() {
            Ok(snapshot) => snapshot,
            Err(_) => return Reply::meta("Failed to save game."),
        };
        match self.gateway.save(&snapshot) {
            Ok(()) => Reply::meta("Saved."),
            Err(_) => Reply::meta("Failed to save game."),
        }
    }

    /// Restore the gateway's snapshot. A missing or corrupt snapshot
    /// leaves the in-memory state untouched.
    pub(crate) fn do_load(&mut self) -> Reply {
        let snapshot = match self.gateway.load() {
            Ok(snapshot) => snapshot,
            Err(EngineError::NoSavedGame) => return Reply::meta("No saved game found."),
            Err(_) => return Reply::meta("Failed to restore game."),
        };
        match WorldState::deserialize(&snapshot) {
            Ok(state) => {
                self.state = state;
                Reply::meta(format!(
                    "Restored.\n\n{}",
                    describe_room(&self.data, &self.state)
                ))
            }
            Err(_) => Reply::meta("Failed to restore game."),
        }
    }

    /// Start over: fresh state from the dataset and a reseeded RNG, so
    /// a restarted session replays identically.
    pub(crate) fn do_restart(&mut self) -> Reply {
        self.state.reset(&self.data);
        self.rng = StdRng::seed_from_u64(self.config.seed);
        Reply::meta(format!(
            "Restarted.\n\n{}",
            describe_room(&self.data, &self.state)
        ))
    }

    pub(crate) fn do_quit(&mut self) -> Reply {
        self.over = true;
        Reply::meta(format!(
            "Your score is {} in {} moves.\nThanks for playing!",
            self.state.score(),
            self.state.moves()
        ))
    }
}
