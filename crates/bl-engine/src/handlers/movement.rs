//! Movement handling.

use bl_core::Action;

use crate::parser::Direction;
use crate::session::{GameSession, Reply};

impl GameSession {
    /// Move in a direction. An undefeated guardian blocks every exit
    /// of its room before the exit itself is even looked at.
    pub(crate) fn do_go(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Which way?");
        }
        if let Some(room) = self.data.room(self.state.current_room())
            && let Some(guardian) = &room.guardian
            && !self.state.global_set(&guardian.flag)
        {
            return Reply::refuse(guardian.message.clone());
        }

        // "enter window" and friends arrive here with a non-direction
        // argument and resolve through their own action keys.
        let action = match Direction::parse(arg) {
            Some(dir) => self.room_action("go", dir.name()),
            None => self.room_action("enter", arg),
        };
        match action {
            Some(Action::Plain(text)) => Reply::ok(text),
            Some(Action::Conditional(rule)) => self.run_rule(&rule),
            None => Reply::refuse("You can't go that way."),
        }
    }
}
