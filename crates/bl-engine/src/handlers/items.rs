//! Item handling: take, drop, put, throw, eat, drink, read, examine,
//! inventory.

use bl_core::ItemLocation;

use crate::narrator::is_lit;
use crate::parser::{resolve_item, split_on};
use crate::session::{GameSession, Reply};

impl GameSession {
    pub(crate) fn do_take(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Take what?");
        }
        if arg == "all" || arg == "everything" {
            return self.take_all();
        }

        let (noun, from) = match split_on(arg, "from") {
            Some((noun, container)) => (noun, Some(container)),
            None => (arg, None),
        };

        let Some(id) = resolve_item(&self.data, noun) else {
            return Reply::refuse(format!("There is no {noun} here."));
        };

        if let Some(from_noun) = from {
            let Some(container) = resolve_item(&self.data, from_noun) else {
                return Reply::refuse(format!("There is no {from_noun} here."));
            };
            if !self.data.is_container(&container) || !self.container_here(&container) {
                return Reply::refuse(format!("There is no {from_noun} here."));
            }
            if !self.state.is_open(&container) {
                return Reply::refuse(format!(
                    "The {} isn't open.",
                    self.data.display_name(&container)
                ));
            }
            if self.state.location(&id) != ItemLocation::Container(container.clone()) {
                return Reply::refuse(format!(
                    "There is no {} in the {}.",
                    self.data.display_name(&id),
                    self.data.display_name(&container)
                ));
            }
        } else {
            if self.state.is_held(&id) {
                return Reply::refuse("You already have that.");
            }
            if !self.is_visible(&id) {
                return Reply::refuse(format!("There is no {noun} here."));
            }
        }

        let Some(item) = self.data.item(&id) else {
            return Reply::refuse(format!("There is no {noun} here."));
        };
        if !item.takeable {
            return Reply::refuse("You can't take that.");
        }

        self.state.place(&id, ItemLocation::Inventory);
        let mut text = "Taken.".to_string();
        self.note_take_award(&id, &mut text);
        Reply::ok(text)
    }

    /// "take all": everything takeable lying on the floor.
    fn take_all(&mut self) -> Reply {
        let room = self.state.current_room().to_string();
        let ids: Vec<String> = self
            .state
            .items_in_room(&room)
            .into_iter()
            .filter(|id| self.data.item(id).is_some_and(|item| item.takeable))
            .map(str::to_string)
            .collect();
        if ids.is_empty() {
            return Reply::refuse("There is nothing here to take.");
        }

        let mut lines = Vec::new();
        for id in ids {
            self.state.place(&id, ItemLocation::Inventory);
            let mut line = format!("{}: Taken.", self.data.display_name(&id));
            self.note_take_award(&id, &mut line);
            lines.push(line);
        }
        Reply::ok(lines.join("\n"))
    }

    fn note_take_award(&mut self, id: &str, text: &mut String) {
        if let Some(score) = self.data.treasure(id)
            && self.state.award_take(id, score.take).is_some()
        {
            text.push_str(&format!(
                "\n(Your score just went up by {} points.)",
                score.take
            ));
        }
    }

    pub(crate) fn do_drop(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Drop what?");
        }
        let Some(id) = resolve_item(&self.data, arg) else {
            return Reply::refuse(format!("You don't have the {arg}."));
        };
        if !self.state.is_held(&id) {
            return Reply::refuse(format!("You don't have the {arg}."));
        }
        let room = self.state.current_room().to_string();
        self.state.place(&id, ItemLocation::Room(room));
        Reply::ok("Dropped.")
    }

    pub(crate) fn do_put(&mut self, arg: &str) -> Reply {
        let Some((noun, target_noun)) = split_on(arg, "in").or_else(|| split_on(arg, "into"))
        else {
            return Reply::refuse("Put it in what?");
        };
        let Some(id) = resolve_item(&self.data, noun) else {
            return Reply::refuse(format!("You don't have the {noun}."));
        };
        if !self.state.is_held(&id) {
            return Reply::refuse(format!("You don't have the {noun}."));
        }
        let Some(target) = resolve_item(&self.data, target_noun) else {
            return Reply::refuse(format!("There is no {target_noun} here."));
        };
        if !self.data.is_container(&target) {
            return Reply::refuse("You can't put things in that.");
        }
        if !self.container_here(&target) {
            return Reply::refuse(format!("There is no {target_noun} here."));
        }
        if target == id {
            return Reply::refuse("You can't put something inside itself.");
        }
        if !self.state.is_open(&target) {
            return Reply::refuse(format!(
                "The {} isn't open.",
                self.data.display_name(&target)
            ));
        }
        if target == "case" && self.data.treasure(&id).is_none() {
            return Reply::refuse("Only treasures belong in the trophy case.");
        }

        self.state.place(&id, ItemLocation::Container(target.clone()));
        let mut text = "Done.".to_string();
        if target == "case"
            && let Some(score) = self.data.treasure(&id)
            && self.state.award_case(&id, score.case).is_some()
        {
            text.push_str(&format!(
                "\n(Your score just went up by {} points.)",
                score.case
            ));
        }
        self.check_victory(&mut text);
        Reply::ok(text)
    }

    pub(crate) fn do_throw(&mut self, arg: &str) -> Reply {
        let noun = match split_on(arg, "at") {
            Some((noun, _)) => noun,
            None => arg,
        };
        if noun.is_empty() {
            return Reply::refuse("Throw what?");
        }
        let Some(id) = resolve_item(&self.data, noun) else {
            return Reply::refuse(format!("You don't have the {noun}."));
        };
        if !self.state.is_held(&id) {
            return Reply::refuse(format!("You don't have the {noun}."));
        }
        let room = self.state.current_room().to_string();
        self.state.place(&id, ItemLocation::Room(room));
        Reply::ok(format!(
            "Not a very good arm. The {} lands on the floor.",
            self.data.display_name(&id)
        ))
    }

    pub(crate) fn do_eat(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Eat what?");
        }
        let Some(id) = resolve_item(&self.data, arg) else {
            return Reply::refuse(format!("You don't have the {arg}."));
        };
        if !self.state.is_held(&id) {
            return Reply::refuse(format!("You don't have the {arg}."));
        }
        let Some(item) = self.data.item(&id) else {
            return Reply::refuse(format!("You don't have the {arg}."));
        };
        if !item.edible {
            return Reply::refuse(format!(
                "I don't think the {} would agree with you.",
                item.name
            ));
        }
        self.state.place(&id, ItemLocation::Nowhere);
        Reply::ok("Thank you very much. It really hit the spot.")
    }

    pub(crate) fn do_drink(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Drink what?");
        }
        let Some(id) = resolve_item(&self.data, arg) else {
            return Reply::refuse(format!("You don't have the {arg}."));
        };
        if !self.state.is_held(&id) {
            return Reply::refuse(format!("You don't have the {arg}."));
        }
        let Some(item) = self.data.item(&id) else {
            return Reply::refuse(format!("You don't have the {arg}."));
        };
        if !item.drinkable {
            return Reply::refuse("You can't drink that!");
        }
        self.state.place(&id, ItemLocation::Nowhere);
        Reply::ok("Thank you very much. That really quenched your thirst.")
    }

    pub(crate) fn do_read(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Read what?");
        }
        let room = self.state.current_room().to_string();
        if !is_lit(&self.data, &self.state, &room) {
            return Reply::refuse("It is impossible to read in the dark.");
        }
        // Room-level inscriptions first, then readable items.
        if let Some(bl_core::Action::Plain(text)) = self.room_action("read", arg) {
            return Reply::ok(text);
        }
        let Some(id) = resolve_item(&self.data, arg) else {
            return Reply::refuse(format!("There is no {arg} here."));
        };
        if !self.is_visible(&id) {
            return Reply::refuse(format!("There is no {arg} here."));
        }
        match self.data.item(&id).and_then(|item| item.text.clone()) {
            Some(text) => Reply::ok(text),
            None => Reply::ok("There's nothing written on it."),
        }
    }

    pub(crate) fn do_examine(&mut self, arg: &str) -> Reply {
        if arg.is_empty() {
            return Reply::refuse("Examine what?");
        }
        let room = self.state.current_room().to_string();
        if !is_lit(&self.data, &self.state, &room) {
            return Reply::refuse("It's too dark to see!");
        }
        let Some(id) = resolve_item(&self.data, arg) else {
            return Reply::refuse(format!("There is no {arg} here."));
        };
        if !self.is_visible(&id) {
            return Reply::refuse(format!("There is no {arg} here."));
        }
        let name = self.data.display_name(&id).to_string();

        if self.data.is_container(&id) {
            if !self.state.is_open(&id) {
                return Reply::ok(format!("The {name} is closed."));
            }
            let contents = self.state.contents(&id);
            if contents.is_empty() {
                return Reply::ok(format!("The {name} is open but empty."));
            }
            let mut text = format!("The {name} contains:");
            let names: Vec<String> = contents
                .iter()
                .map(|inner| self.data.display_name(inner).to_string())
                .collect();
            for inner in names {
                text.push_str(&format!("\n  {inner}"));
            }
            return Reply::ok(text);
        }
        Reply::ok(format!("There's nothing special about the {name}."))
    }

    pub(crate) fn do_inventory(&mut self) -> Reply {
        let held = self.state.inventory();
        if held.is_empty() {
            return Reply::ok("You are empty-handed.");
        }
        let mut text = "You are carrying:".to_string();
        let names: Vec<String> = held
            .iter()
            .map(|id| self.data.display_name(id).to_string())
            .collect();
        for name in names {
            text.push_str(&format!("\n  {name}"));
        }
        Reply::ok(text)
    }
}
