//! The static world dataset: rooms, actions, items, and scoring tables.
//!
//! The dataset is an external, read-only resource. On disk an action
//! value is either a bare string or a structured descriptor; loading
//! normalizes both into the tagged [`Action`] enum exactly once, so
//! handlers never re-interpret loose JSON shapes per call.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::state::ItemLocation;

/// A flag reference in dataset rules: `"global:name"` addresses the
/// global flag map, anything else addresses the current room's flags.
pub const GLOBAL_FLAG_PREFIX: &str = "global:";

/// One required-item check with an optional bespoke failure line.
#[derive(Debug, Clone)]
pub struct ItemCheck {
    /// Item id the player must be carrying.
    pub item: String,
    /// Failure narration; defaults to "You don't have the <name>."
    pub fail: Option<String>,
}

/// One required-flag check with an optional bespoke failure line.
/// Checks run in order and the first failing check's message is shown,
/// which is how ordered gates (rug before trapdoor) are expressed.
#[derive(Debug, Clone)]
pub struct FlagCheck {
    /// Flag reference (see [`GLOBAL_FLAG_PREFIX`]).
    pub flag: String,
    /// Failure narration; falls back to the rule's `fail_message`.
    pub fail: Option<String>,
}

/// A structured action descriptor, resolved at load time.
#[derive(Debug, Clone, Default)]
pub struct ActionRule {
    /// Room to move the player to on success.
    pub destination: Option<String>,
    /// Narration on success.
    pub message: Option<String>,
    /// Items the player must be carrying, checked in order.
    pub requires_items: Vec<ItemCheck>,
    /// Flags that must be set, checked in order.
    pub requires_flags: Vec<FlagCheck>,
    /// Flags to set (true) or clear (false) on success.
    pub sets: BTreeMap<String, bool>,
    /// Carried items destroyed on success (location becomes nowhere).
    pub consumes: Vec<String>,
    /// Items placed into a room on success, but only while their
    /// location is still nowhere, so a reveal never fires twice.
    pub reveals: BTreeMap<String, String>,
    /// Default failure narration when a check has no bespoke line.
    pub fail_message: Option<String>,
}

/// A room action: plain narration, or a guarded rule.
#[derive(Debug, Clone)]
pub enum Action {
    /// Fixed narration with no state effect.
    Plain(String),
    /// Guarded state transition.
    Conditional(ActionRule),
}

/// A guardian that blocks every exit of its room until a global flag
/// is set (e.g. the troll).
#[derive(Debug, Clone)]
pub struct Guardian {
    /// Global flag that lifts the blockade.
    pub flag: String,
    /// Fixed blocking narration.
    pub message: String,
}

/// A counter-gated reveal: repeating a verb in this room accumulates a
/// counter; at the threshold the payload fires exactly once.
#[derive(Debug, Clone)]
pub struct CounterReveal {
    /// Name of the per-room counter flag.
    pub counter: String,
    /// Count at which the reveal fires.
    pub threshold: i64,
    /// Item placed into this room when the reveal fires.
    pub reveals: Option<String>,
    /// Flag reference set when the reveal fires.
    pub sets: Option<String>,
    /// Narration while below the threshold.
    pub progress: String,
    /// Narration when the reveal fires.
    pub message: String,
}

/// An alternate room description shown while a flag is set.
#[derive(Debug, Clone)]
pub struct AltDescription {
    /// Flag reference selecting the variant.
    pub flag: String,
    /// Replacement description text.
    pub text: String,
}

/// A single room. Immutable at runtime.
#[derive(Debug, Clone)]
pub struct Room {
    /// Base description.
    pub description: String,
    /// Optional flag-selected description variant.
    pub alt: Option<AltDescription>,
    /// Dark rooms need a burning light source to be seen in.
    pub dark: bool,
    /// Optional exit-blocking guardian.
    pub guardian: Option<Guardian>,
    /// Optional counter-gated reveal for the dig verb.
    pub dig: Option<CounterReveal>,
    /// Optional counter-gated reveal for the wait verb.
    pub wait: Option<CounterReveal>,
    /// Actions keyed by normalized phrase ("go north", "open window").
    pub actions: BTreeMap<String, Action>,
}

impl Room {
    /// Look up an action by its normalized key.
    pub fn action(&self, key: &str) -> Option<&Action> {
        self.actions.get(key)
    }
}

/// How an item emits light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Burns on its own (the torch).
    Always,
    /// Burns while its `<id>-lit` global flag is set (the lamp).
    Switchable,
}

/// A single item definition.
#[derive(Debug, Clone)]
pub struct Item {
    /// Display name ("brass lantern").
    pub name: String,
    /// Extra nouns that resolve to this item.
    pub aliases: Vec<String>,
    /// False for fixtures (trophy case, machine, mailbox).
    pub takeable: bool,
    /// Readable text, if any.
    pub text: Option<String>,
    /// Light emission, if any.
    pub light: Option<LightKind>,
    /// True if `eat` consumes it.
    pub edible: bool,
    /// True if `drink` consumes it.
    pub drinkable: bool,
    /// Starting location.
    pub start: ItemLocation,
}

/// Container behavior for an item that can hold others.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Initial contents, established exactly once.
    pub contents: Vec<String>,
    /// Lazy containers are filled on first open, eager ones at start.
    pub lazy: bool,
    /// Whether the container starts open.
    pub open: bool,
}

/// Score awards for one treasure.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TreasureScore {
    /// Points granted the first time the treasure is taken.
    pub take: u32,
    /// Points granted the first time it is placed in the trophy case.
    pub case: u32,
}

/// The loaded, validated world dataset.
#[derive(Debug, Clone)]
pub struct WorldDataset {
    name: String,
    start_room: String,
    rooms: BTreeMap<String, Room>,
    items: BTreeMap<String, Item>,
    containers: BTreeMap<String, ContainerSpec>,
    treasures: BTreeMap<String, TreasureScore>,
    deaths: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Raw on-disk shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAction {
    Text(String),
    Rule(RawRule),
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawRule {
    destination: Option<String>,
    message: Option<String>,
    #[serde(default)]
    requires_items: Vec<RawItemCheck>,
    #[serde(default)]
    requires_flags: Vec<RawFlagCheck>,
    #[serde(default)]
    sets: BTreeMap<String, bool>,
    #[serde(default)]
    consumes: Vec<String>,
    #[serde(default)]
    reveals: BTreeMap<String, String>,
    fail_message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemCheck {
    Bare(String),
    WithFail { item: String, fail: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlagCheck {
    Bare(String),
    WithFail { flag: String, fail: String },
}

#[derive(Deserialize)]
struct RawCounterReveal {
    counter: String,
    threshold: i64,
    reveals: Option<String>,
    sets: Option<String>,
    progress: String,
    message: String,
}

#[derive(Deserialize)]
struct RawAlt {
    flag: String,
    text: String,
}

#[derive(Deserialize)]
struct RawGuardian {
    flag: String,
    message: String,
}

#[derive(Deserialize)]
struct RawRoom {
    description: String,
    alt: Option<RawAlt>,
    #[serde(default)]
    dark: bool,
    guardian: Option<RawGuardian>,
    dig: Option<RawCounterReveal>,
    wait: Option<RawCounterReveal>,
    #[serde(default)]
    actions: BTreeMap<String, RawAction>,
}

#[derive(Deserialize)]
struct RawItem {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default = "default_true")]
    takeable: bool,
    text: Option<String>,
    light: Option<LightKind>,
    #[serde(default)]
    edible: bool,
    #[serde(default)]
    drinkable: bool,
    /// Room id, "inventory", a container id, or null.
    start: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct RawContainer {
    #[serde(default)]
    contents: Vec<String>,
    #[serde(default)]
    lazy: bool,
    #[serde(default)]
    open: bool,
}

#[derive(Deserialize)]
struct RawDataset {
    name: String,
    start_room: String,
    rooms: BTreeMap<String, RawRoom>,
    items: BTreeMap<String, RawItem>,
    #[serde(default)]
    containers: BTreeMap<String, RawContainer>,
    #[serde(default)]
    treasures: BTreeMap<String, TreasureScore>,
    #[serde(default)]
    deaths: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

impl WorldDataset {
    /// Parse and validate a dataset from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::resolve(raw)
    }

    /// The dataset shipped with the crate.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_json(include_str!("../data/world.json"))
    }

    fn resolve(raw: RawDataset) -> CoreResult<Self> {
        let room_ids: Vec<String> = raw.rooms.keys().cloned().collect();

        let mut rooms = BTreeMap::new();
        for (id, room) in raw.rooms {
            let mut actions = BTreeMap::new();
            for (key, action) in room.actions {
                let resolved = match action {
                    // A bare string naming a room is a destination;
                    // any other bare string is plain narration.
                    RawAction::Text(text) if room_ids.contains(&text) => {
                        Action::Conditional(ActionRule {
                            destination: Some(text),
                            ..ActionRule::default()
                        })
                    }
                    RawAction::Text(text) => Action::Plain(text),
                    RawAction::Rule(rule) => Action::Conditional(ActionRule {
                        destination: rule.destination,
                        message: rule.message,
                        requires_items: rule
                            .requires_items
                            .into_iter()
                            .map(|c| match c {
                                RawItemCheck::Bare(item) => ItemCheck { item, fail: None },
                                RawItemCheck::WithFail { item, fail } => ItemCheck {
                                    item,
                                    fail: Some(fail),
                                },
                            })
                            .collect(),
                        requires_flags: rule
                            .requires_flags
                            .into_iter()
                            .map(|c| match c {
                                RawFlagCheck::Bare(flag) => FlagCheck { flag, fail: None },
                                RawFlagCheck::WithFail { flag, fail } => FlagCheck {
                                    flag,
                                    fail: Some(fail),
                                },
                            })
                            .collect(),
                        sets: rule.sets,
                        consumes: rule.consumes,
                        reveals: rule.reveals,
                        fail_message: rule.fail_message,
                    }),
                };
                actions.insert(key.to_lowercase(), resolved);
            }

            rooms.insert(
                id,
                Room {
                    description: room.description,
                    alt: room.alt.map(|a| AltDescription {
                        flag: a.flag,
                        text: a.text,
                    }),
                    dark: room.dark,
                    guardian: room.guardian.map(|g| Guardian {
                        flag: g.flag,
                        message: g.message,
                    }),
                    dig: room.dig.map(resolve_counter),
                    wait: room.wait.map(resolve_counter),
                    actions,
                },
            );
        }

        let mut items = BTreeMap::new();
        for (id, item) in raw.items {
            let start = match item.start.as_deref() {
                None => ItemLocation::Nowhere,
                Some("inventory") => ItemLocation::Inventory,
                Some(place) if raw.containers.contains_key(place) => {
                    ItemLocation::Container(place.to_string())
                }
                Some(place) if rooms.contains_key(place) => {
                    ItemLocation::Room(place.to_string())
                }
                Some(other) => {
                    return Err(CoreError::Validation(format!(
                        "item \"{id}\" starts in unknown place \"{other}\""
                    )));
                }
            };
            items.insert(
                id,
                Item {
                    name: item.name,
                    aliases: item.aliases,
                    takeable: item.takeable,
                    text: item.text,
                    light: item.light,
                    edible: item.edible,
                    drinkable: item.drinkable,
                    start,
                },
            );
        }

        let containers: BTreeMap<String, ContainerSpec> = raw
            .containers
            .into_iter()
            .map(|(id, c)| {
                (
                    id,
                    ContainerSpec {
                        contents: c.contents,
                        lazy: c.lazy,
                        open: c.open,
                    },
                )
            })
            .collect();

        let dataset = Self {
            name: raw.name,
            start_room: raw.start_room,
            rooms,
            items,
            containers,
            treasures: raw.treasures,
            deaths: raw.deaths,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    fn validate(&self) -> CoreResult<()> {
        if !self.rooms.contains_key(&self.start_room) {
            return Err(CoreError::Validation(format!(
                "start room \"{}\" is not defined",
                self.start_room
            )));
        }
        for (room_id, room) in &self.rooms {
            for (key, action) in &room.actions {
                if let Action::Conditional(rule) = action {
                    if let Some(dest) = &rule.destination
                        && !self.rooms.contains_key(dest)
                    {
                        return Err(CoreError::Validation(format!(
                            "action \"{key}\" in \"{room_id}\" leads to unknown room \"{dest}\""
                        )));
                    }
                    for check in &rule.requires_items {
                        self.expect_item(&check.item, room_id, key)?;
                    }
                    for item in &rule.consumes {
                        self.expect_item(item, room_id, key)?;
                    }
                    for (item, dest) in &rule.reveals {
                        self.expect_item(item, room_id, key)?;
                        if !self.rooms.contains_key(dest) {
                            return Err(CoreError::Validation(format!(
                                "action \"{key}\" in \"{room_id}\" reveals into unknown room \"{dest}\""
                            )));
                        }
                    }
                }
            }
            for reveal in [&room.dig, &room.wait].into_iter().flatten() {
                if let Some(item) = &reveal.reveals {
                    self.expect_item(item, room_id, &reveal.counter)?;
                }
            }
        }
        for (id, spec) in &self.containers {
            if !self.items.contains_key(id) {
                return Err(CoreError::Validation(format!(
                    "container \"{id}\" is not a defined item"
                )));
            }
            for inner in &spec.contents {
                if !self.items.contains_key(inner) {
                    return Err(CoreError::Validation(format!(
                        "container \"{id}\" holds unknown item \"{inner}\""
                    )));
                }
            }
        }
        for id in self.treasures.keys() {
            if !self.items.contains_key(id) {
                return Err(CoreError::Validation(format!(
                    "treasure \"{id}\" is not a defined item"
                )));
            }
        }
        Ok(())
    }

    fn expect_item(&self, item: &str, room_id: &str, key: &str) -> CoreResult<()> {
        if self.items.contains_key(item) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "action \"{key}\" in \"{room_id}\" references unknown item \"{item}\""
            )))
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Dataset title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Room the player starts in.
    pub fn start_room(&self) -> &str {
        &self.start_room
    }

    /// Look up a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// All rooms in stable order.
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &Room)> {
        self.rooms.iter().map(|(id, room)| (id.as_str(), room))
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// All items in stable order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.items.iter().map(|(id, item)| (id.as_str(), item))
    }

    /// Display name for an item id; falls back to the id itself.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.items.get(id).map_or(id, |item| item.name.as_str())
    }

    /// Container behavior for an item, if it is one.
    pub fn container(&self, id: &str) -> Option<&ContainerSpec> {
        self.containers.get(id)
    }

    /// True if the item can hold other items.
    pub fn is_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    /// All containers in stable order.
    pub fn containers(&self) -> impl Iterator<Item = (&str, &ContainerSpec)> {
        self.containers.iter().map(|(id, c)| (id.as_str(), c))
    }

    /// Scoring for a treasure, if the item is one.
    pub fn treasure(&self, id: &str) -> Option<TreasureScore> {
        self.treasures.get(id).copied()
    }

    /// All treasures in stable order.
    pub fn treasures(&self) -> impl Iterator<Item = (&str, TreasureScore)> {
        self.treasures.iter().map(|(id, t)| (id.as_str(), *t))
    }

    /// Death narration for a cause.
    pub fn death(&self, cause: &str) -> Option<&str> {
        self.deaths.get(cause).map(String::as_str)
    }
}

fn resolve_counter(raw: RawCounterReveal) -> CounterReveal {
    CounterReveal {
        counter: raw.counter,
        threshold: raw.threshold,
        reveals: raw.reveals,
        sets: raw.sets,
        progress: raw.progress,
        message: raw.message,
    }
}
