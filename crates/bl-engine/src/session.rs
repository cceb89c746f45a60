//! The game session: one mutable world, one command at a time.

use rand::SeedableRng;
use rand::rngs::StdRng;

use bl_core::{Action, ActionRule, ItemLocation, Status, WorldDataset, WorldState};

use crate::config::GameConfig;
use crate::error::EngineResult;
use crate::gateway::{MemorySlot, SaveGateway};
use crate::narrator::{describe_room, flag_ref_set, is_lit, set_flag_ref};
use crate::parser::{Verb, parse_command, resolve_item};

/// The one cheat phrase, matched against the whole normalized line.
const CHEAT_PHRASE: &str = "open sesame";

/// Words that draw a scolding instead of a parse.
const PROFANITY: &[&str] = &["damn", "shit", "fuck", "crap", "bastard"];

/// Items granted by the cheat phrase.
const CHEAT_KIT: &[&str] = &[
    "lamp",
    "sword",
    "knife",
    "rope",
    "skeleton-key",
    "shovel",
    "wrench",
    "screwdriver",
];

/// Consecutive unlit turns the player survives before the grue eats
/// them: the first ends with a warning, the second is fatal.
const GRUE_GRACE_TURNS: i64 = 2;

/// How one command turned out. Refused commands must not have touched
/// the state; the session only counts moves for the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The command did its thing (or narrated a defined response).
    Accepted,
    /// A precondition failed; the state was not touched.
    Refused,
    /// A meta command (score, save, load, ...): no move is counted.
    Meta,
}

/// A handler's answer: narration plus how it should be accounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reply {
    text: String,
    outcome: Outcome,
}

impl Reply {
    pub(crate) fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: Outcome::Accepted,
        }
    }

    pub(crate) fn refuse(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: Outcome::Refused,
        }
    }

    pub(crate) fn meta(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: Outcome::Meta,
        }
    }
}

/// A single-player game session.
///
/// Owns the dataset, the world state, a seeded RNG for combat, and the
/// save gateway. [`GameSession::process`] is the whole public surface:
/// free text in, narration out, never an error.
pub struct GameSession {
    pub(crate) data: WorldDataset,
    pub(crate) state: WorldState,
    pub(crate) config: GameConfig,
    pub(crate) rng: StdRng,
    pub(crate) gateway: Box<dyn SaveGateway>,
    last_input: Option<String>,
    pub(crate) over: bool,
}

impl GameSession {
    /// Start a session on a dataset with an in-memory save slot.
    pub fn new(data: WorldDataset, config: GameConfig) -> Self {
        Self::with_gateway(data, config, Box::new(MemorySlot::new()))
    }

    /// Start a session on the built-in dataset.
    pub fn builtin(config: GameConfig) -> EngineResult<Self> {
        Ok(Self::new(WorldDataset::builtin()?, config))
    }

    /// Start a session with a custom save gateway.
    pub fn with_gateway(
        data: WorldDataset,
        config: GameConfig,
        gateway: Box<dyn SaveGateway>,
    ) -> Self {
        let state = WorldState::new(&data);
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            data,
            state,
            config,
            gateway,
            last_input: None,
            over: false,
        }
    }

    /// The current world state.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// The dataset the session runs on.
    pub fn data(&self) -> &WorldDataset {
        &self.data
    }

    /// True once the player has quit.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Opening narration: the dataset title and the starting room.
    pub fn intro(&self) -> String {
        format!("{}\n\n{}", self.data.name(), describe_room(&self.data, &self.state))
    }

    /// Process one line of player input and return the narration.
    ///
    /// Never panics and never fails: every fault, from gibberish to a
    /// broken save slot, comes back as narration.
    pub fn process(&mut self, input: &str) -> String {
        let normalized = crate::parser::normalize(input);
        if normalized.is_empty() {
            return "I beg your pardon?".to_string();
        }

        // "again" replays the previous stored line and is itself never
        // stored, so "g g g" repeats one real command.
        let line = if matches!(normalized.as_str(), "g" | "again") {
            match &self.last_input {
                Some(prev) => prev.clone(),
                None => return "You haven't done anything yet.".to_string(),
            }
        } else {
            self.last_input = Some(normalized.clone());
            normalized
        };

        let reply = self.run(&line);
        match reply.outcome {
            Outcome::Accepted => {
                self.state.record_move();
                let mut text = reply.text;
                self.darkness_tick(&mut text);
                text
            }
            Outcome::Refused | Outcome::Meta => reply.text,
        }
    }

    fn run(&mut self, line: &str) -> Reply {
        if line == CHEAT_PHRASE {
            return self.do_cheat();
        }
        if let Some(first) = line.split(' ').next()
            && PROFANITY.contains(&first)
        {
            return Reply::ok("Such language in a high-class establishment like this!");
        }

        let cmd = parse_command(line);

        if self.state.status() != Status::Alive && !Self::allowed_when_over(&cmd.verb) {
            let text = match self.state.status() {
                Status::Dead => {
                    "You are dead. You can get your score, restart, restore a saved game, or quit."
                }
                _ => "The game is over. You can get your score, restart, restore a saved game, or quit.",
            };
            return Reply::meta(text);
        }

        let arg = cmd.arg.as_str();
        match cmd.verb {
            Verb::Go => self.do_go(arg),
            Verb::Take => self.do_take(arg),
            Verb::Drop => self.do_drop(arg),
            Verb::Put => self.do_put(arg),
            Verb::Open => self.do_open(arg),
            Verb::Close => self.do_close(arg),
            Verb::Move => self.do_move_fixture(arg),
            Verb::Unlock => self.do_unlock(arg),
            Verb::Look => self.do_look(arg),
            Verb::Examine => self.do_examine(arg),
            Verb::Read => self.do_read(arg),
            Verb::Inventory => self.do_inventory(),
            Verb::Score => self.do_score(),
            Verb::Diagnose => self.do_diagnose(),
            Verb::Help => self.do_help(),
            Verb::Turn => self.do_turn(arg),
            Verb::Use => self.do_use(arg),
            Verb::Light => self.do_light(arg),
            Verb::Wave => self.do_wave(arg),
            Verb::Tie => self.do_tie(arg),
            Verb::Give => self.do_give(arg),
            Verb::Attack => self.do_attack(arg),
            Verb::Throw => self.do_throw(arg),
            Verb::Dig => self.do_dig(arg),
            Verb::Cross => self.do_cross(arg),
            Verb::Touch => self.do_generic("touch", arg),
            Verb::Rub => self.do_generic("rub", arg),
            Verb::Squeeze => self.do_generic("squeeze", arg),
            Verb::Climb => self.do_generic("climb", arg),
            Verb::Knock => self.do_generic("knock", arg),
            Verb::Wind => self.do_wind(arg),
            Verb::Pray => self.do_pray(),
            Verb::Wait => self.do_wait(),
            Verb::Eat => self.do_eat(arg),
            Verb::Drink => self.do_drink(arg),
            Verb::Again => Reply::meta("You haven't done anything yet."),
            Verb::Save => self.do_save(),
            Verb::Load => self.do_load(),
            Verb::Restart => self.do_restart(),
            Verb::Quit => self.do_quit(),
            Verb::Unknown => Reply::ok("I don't understand that command."),
        }
    }

    fn allowed_when_over(verb: &Verb) -> bool {
        matches!(
            verb,
            Verb::Look
                | Verb::Score
                | Verb::Help
                | Verb::Save
                | Verb::Load
                | Verb::Restart
                | Verb::Quit
        )
    }

    // -----------------------------------------------------------------------
    // Shared machinery for handlers
    // -----------------------------------------------------------------------

    /// Evaluate a conditional action rule against the current room.
    ///
    /// Checks run in declaration order and the first failure refuses
    /// the command with its message, leaving the state untouched. On
    /// success all effects apply as one mutation.
    pub(crate) fn run_rule(&mut self, rule: &ActionRule) -> Reply {
        let room = self.state.current_room().to_string();

        for check in &rule.requires_flags {
            if !flag_ref_set(&self.state, &room, &check.flag) {
                let text = check
                    .fail
                    .clone()
                    .or_else(|| rule.fail_message.clone())
                    .unwrap_or_else(|| "You can't do that.".to_string());
                return Reply::refuse(text);
            }
        }
        for check in &rule.requires_items {
            if !self.state.is_held(&check.item) {
                let text = check.fail.clone().or_else(|| rule.fail_message.clone()).unwrap_or_else(
                    || format!("You don't have the {}.", self.data.display_name(&check.item)),
                );
                return Reply::refuse(text);
            }
        }

        for (flag, value) in &rule.sets {
            set_flag_ref(&mut self.state, &room, flag, *value);
        }
        for item in &rule.consumes {
            self.state.place(item, ItemLocation::Nowhere);
        }
        for (item, dest) in &rule.reveals {
            if self.state.location(item) == ItemLocation::Nowhere {
                self.state.place(item, ItemLocation::Room(dest.clone()));
            }
        }

        let mut text = rule.message.clone().unwrap_or_default();
        if let Some(dest) = &rule.destination {
            self.state.set_current_room(dest.clone());
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(&describe_room(&self.data, &self.state));
        }
        if text.is_empty() {
            text = "Done.".to_string();
        }
        Reply::ok(text)
    }

    /// Look up a room action by verb and noun phrase, trying the noun
    /// as typed first and its resolved item id second.
    pub(crate) fn room_action(&self, verb: &str, noun: &str) -> Option<Action> {
        let room = self.data.room(self.state.current_room())?;
        let key = if noun.is_empty() {
            verb.to_string()
        } else {
            format!("{verb} {noun}")
        };
        if let Some(action) = room.action(&key) {
            return Some(action.clone());
        }
        let id = resolve_item(&self.data, noun)?;
        room.action(&format!("{verb} {id}")).cloned()
    }

    /// True if the item lies in the current room, sits in an open
    /// container here (or carried), or is carried itself.
    pub(crate) fn is_visible(&self, item: &str) -> bool {
        match self.state.location(item) {
            ItemLocation::Inventory => true,
            ItemLocation::Room(room) => room == self.state.current_room(),
            ItemLocation::Container(c) => self.state.is_open(&c) && self.container_here(&c),
            ItemLocation::Nowhere => false,
        }
    }

    /// True if a container item is in reach: on the floor here or
    /// carried.
    pub(crate) fn container_here(&self, container: &str) -> bool {
        match self.state.location(container) {
            ItemLocation::Inventory => true,
            ItemLocation::Room(r) => r == self.state.current_room(),
            _ => false,
        }
    }

    /// Full treasure set in the case means victory; appends the win
    /// narration once and flips the terminal status.
    pub(crate) fn check_victory(&mut self, text: &mut String) {
        if self.state.status() != Status::Alive {
            return;
        }
        let all_cased = self
            .data
            .treasures()
            .all(|(id, _)| self.state.location(id) == ItemLocation::Container("case".to_string()));
        if all_cased {
            self.state.set_status(Status::Won);
            text.push_str(&format!(
                "\n\nAn almost inaudible voice whispers in your ear, \"Look to your treasures for the final secret.\" Your collection is complete!\n\n    **** You have won ****\n\nYour score is {} in {} moves.",
                self.state.score(),
                self.state.moves()
            ));
        }
    }

    /// After an accepted command, being in an unlit room starts the
    /// grue clock; staying in the dark for a second turn is fatal.
    fn darkness_tick(&mut self, text: &mut String) {
        if self.state.status() != Status::Alive {
            return;
        }
        let room = self.state.current_room().to_string();
        if is_lit(&self.data, &self.state, &room) {
            // Only touch the counter if a dark streak is being broken,
            // so turns in the light leave the document untouched.
            if self.state.global("dark-turns") != 0 {
                self.state.set_global("dark-turns", 0);
            }
            return;
        }
        let turns = self.state.global("dark-turns") + 1;
        self.state.set_global("dark-turns", turns);
        if turns >= GRUE_GRACE_TURNS {
            self.state.set_status(Status::Dead);
            let death = self
                .data
                .death("grue")
                .unwrap_or("You have died.")
                .to_string();
            text.push_str(&format!("\n\n{death}\n\n    **** You have died ****"));
        }
    }

    // -----------------------------------------------------------------------
    // Cheat
    // -----------------------------------------------------------------------

    fn do_cheat(&mut self) -> Reply {
        let treasures: Vec<String> = self.data.treasures().map(|(id, _)| id.to_string()).collect();
        for id in &treasures {
            self.state
                .place(id, ItemLocation::Container("case".to_string()));
            if let Some(score) = self.data.treasure(id) {
                self.state.award_case(id, score.case);
            }
        }
        for id in CHEAT_KIT {
            self.state.place(id, ItemLocation::Inventory);
        }
        let mut text = "A hollow voice says: \"Granted.\" Treasures rain into the trophy case and your pack grows heavy.".to_string();
        self.check_victory(&mut text);
        Reply::ok(text)
    }
}
