//! Puzzle verbs: combat, digging, waiting, waving, tying, giving, and
//! the other one-off rituals.

use bl_core::{Action, CounterReveal, ItemLocation};
use rand::Rng;

use crate::narrator::set_flag_ref;
use crate::parser::{resolve_item, split_on};
use crate::session::{GameSession, Reply};

/// Chance (out of 100) that a weapon blow fells a guardian.
const GUARDIAN_HIT_CHANCE: u32 = 50;

/// Digging needs the shovel.
const DIG_TOOL: &str = "shovel";

/// Weapons a bare "attack" reaches for, in preference order.
const WEAPONS: &[&str] = &["sword", "knife"];

impl GameSession {
    pub(crate) fn do_wave(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Wave what?");
        }
        if let Some(action) = self.room_action("wave", arg) {
            return match action {
                Action::Plain(text) => Reply::ok(text),
                Action::Conditional(rule) => self.run_rule(&rule),
            };
        }
        match resolve_item(&self.data, arg) {
            Some(id) if self.state.is_held(&id) => Reply::ok(format!(
                "Waving the {} accomplishes nothing.",
                self.data.display_name(&id)
            )),
            _ => Reply::refuse(format!("You don't have the {arg}.")),
        }
    }

    pub(crate) fn do_tie(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Tie what?");
        }
        let noun = match split_on(arg, "to") {
            Some((noun, _target)) => noun,
            None => arg,
        };
        match self.room_action("tie", noun) {
            Some(Action::Plain(text)) => Reply::ok(text),
            Some(Action::Conditional(rule)) => self.run_rule(&rule),
            None => Reply::refuse("You can't tie that to anything here."),
        }
    }

    pub(crate) fn do_give(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Give what?");
        }
        let noun = match split_on(arg, "to") {
            Some((noun, _recipient)) => noun,
            None => arg,
        };
        match self.room_action("give", noun) {
            Some(Action::Plain(text)) => Reply::ok(text),
            Some(Action::Conditional(rule)) => self.run_rule(&rule),
            None => Reply::refuse("There's nobody here who wants that."),
        }
    }

    /// Combat. Only a room's guardian can actually be fought; the
    /// outcome of each blow comes from the session RNG, so a seed
    /// replays the same fight.
    pub(crate) fn do_attack(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Attack what?");
        }
        let (target_noun, weapon_noun) = match split_on(arg, "with") {
            Some((target, weapon)) => (target, Some(weapon)),
            None => (arg, None),
        };
        let Some(target) = resolve_item(&self.data, target_noun) else {
            return Reply::refuse(format!("There is no {target_noun} here."));
        };
        if !self.is_visible(&target) {
            return Reply::refuse(format!("There is no {target_noun} here."));
        }
        let target_name = self.data.display_name(&target).to_string();

        let guardian = self
            .data
            .room(self.state.current_room())
            .and_then(|room| room.guardian.clone())
            .filter(|g| !self.state.global_set(&g.flag));
        let is_creature = self
            .data
            .item(&target)
            .is_some_and(|item| !item.takeable);
        let fighting_guardian = guardian.is_some()
            && is_creature
            && self.state.location(&target)
                == ItemLocation::Room(self.state.current_room().to_string());
        let Some(guardian) = guardian.filter(|_| fighting_guardian) else {
            return Reply::ok(format!(
                "Attacking the {target_name} doesn't seem to help."
            ));
        };

        let weapon = match weapon_noun {
            Some(noun) => match resolve_item(&self.data, noun) {
                Some(id) if self.state.is_held(&id) => Some(id),
                _ => return Reply::refuse(format!("You don't have the {noun}.")),
            },
            None => WEAPONS
                .iter()
                .find(|id| self.state.is_held(id))
                .map(|id| (*id).to_string()),
        };
        let Some(weapon) = weapon else {
            return Reply::refuse(format!(
                "Attacking the {target_name} with your bare hands is suicidal."
            ));
        };

        let roll = self.rng.random_range(1..=100);
        if roll <= GUARDIAN_HIT_CHANCE {
            self.state.set_global(&guardian.flag, 1);
            self.state.place(&target, ItemLocation::Nowhere);
            Reply::ok(format!(
                "The fatal blow lands! Almost as soon as the {target_name} breathes his last breath, a cloud of sinister black fog envelops him, and when the fog lifts, the carcass has disappeared."
            ))
        } else {
            Reply::ok(format!(
                "A good stroke with the {}, but it's too slow; the {target_name} dodges.",
                self.data.display_name(&weapon)
            ))
        }
    }

    pub(crate) fn do_dig(&mut self, _arg: &str) -> Reply {
        if !self.state.is_held(DIG_TOOL) {
            return Reply::refuse("Digging with your bare hands is slow and tedious.");
        }
        let reveal = self
            .data
            .room(self.state.current_room())
            .and_then(|room| room.dig.clone());
        match reveal {
            Some(reveal) => self.run_counter(&reveal),
            None => Reply::ok("The ground here is too hard for digging."),
        }
    }

    pub(crate) fn do_wait(&mut self) -> Reply {
        let reveal = self
            .data
            .room(self.state.current_room())
            .and_then(|room| room.wait.clone());
        match reveal {
            Some(reveal) => self.run_counter(&reveal),
            None => Reply::ok("Time passes."),
        }
    }

    /// Shared engine for dig/wait counters: below the threshold the
    /// progress line, at the threshold the payload (once), past it a
    /// shrug.
    fn run_counter(&mut self, reveal: &CounterReveal) -> Reply {
        let room = self.state.current_room().to_string();
        let count = self.state.bump_flag(&room, &reveal.counter);
        if count < reveal.threshold {
            return Reply::ok(reveal.progress.clone());
        }
        if count > reveal.threshold {
            return Reply::ok("There's nothing more to find here.");
        }
        if let Some(item) = &reveal.reveals
            && self.state.location(item) == ItemLocation::Nowhere
        {
            self.state.place(item, ItemLocation::Room(room.clone()));
        }
        if let Some(flag) = &reveal.sets {
            set_flag_ref(&mut self.state, &room, flag, true);
        }
        Reply::ok(reveal.message.clone())
    }

    /// "use X": the item must be carried, then the room decides what
    /// using it means here.
    pub(crate) fn do_use(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Use what?");
        }
        let Some(id) = resolve_item(&self.data, arg) else {
            return Reply::refuse(format!("You don't have the {arg}."));
        };
        if !self.state.is_held(&id) {
            return Reply::refuse(format!("You don't have the {arg}."));
        }
        match self.room_action("use", arg) {
            Some(Action::Plain(text)) => Reply::ok(text),
            Some(Action::Conditional(rule)) => self.run_rule(&rule),
            None => Reply::ok(format!(
                "You can't use the {} here.",
                self.data.display_name(&id)
            )),
        }
    }

    pub(crate) fn do_wind(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Wind what?");
        }
        if let Some(action) = self.room_action("wind", arg) {
            return match action {
                Action::Plain(text) => Reply::ok(text),
                Action::Conditional(rule) => self.run_rule(&rule),
            };
        }
        match resolve_item(&self.data, arg) {
            Some(id) if self.state.is_held(&id) => {
                Reply::ok("You wind it up, but nothing happens.")
            }
            _ => Reply::refuse(format!("You don't have the {arg}.")),
        }
    }

    pub(crate) fn do_pray(&mut self) -> Reply {
        match self.room_action("pray", "") {
            Some(Action::Plain(text)) => Reply::ok(text),
            Some(Action::Conditional(rule)) => self.run_rule(&rule),
            None => Reply::ok("If you pray enough, your prayers may be answered."),
        }
    }

    pub(crate) fn do_cross(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Cross what?");
        }
        match self.room_action("cross", arg) {
            Some(Action::Plain(text)) => Reply::ok(text),
            Some(Action::Conditional(rule)) => self.run_rule(&rule),
            None => Reply::refuse("You can't cross that."),
        }
    }

    /// Touch, rub, squeeze, climb, knock: dataset-scripted where the
    /// room says so, a shrug otherwise.
    pub(crate) fn do_generic(&mut self, verb: &str, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse(format!("{} what?", capitalize(verb)));
        }
        if let Some(action) = self.room_action(verb, arg) {
            return match action {
                Action::Plain(text) => Reply::ok(text),
                Action::Conditional(rule) => self.run_rule(&rule),
            };
        }
        match resolve_item(&self.data, arg) {
            Some(id) if self.is_visible(&id) => {
                Reply::ok("That doesn't seem to accomplish anything.")
            }
            _ => Reply::refuse(format!("There is no {arg} here.")),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
