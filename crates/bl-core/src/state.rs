//! The mutable world state store.
//!
//! One [`WorldState`] value is the whole session document: player room,
//! item placement, container bits, flags, score, and terminal status. A
//! single item-to-location map is the sole owner of every item, so the
//! "an item is in exactly one place" invariant holds structurally;
//! inventory and container contents are derived views of that map.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dataset::WorldDataset;
use crate::error::{CoreError, CoreResult};

/// Where a single item currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLocation {
    /// On the floor of a room.
    Room(String),
    /// Carried by the player.
    Inventory,
    /// Inside a container item.
    Container(String),
    /// Consumed, destroyed, or not yet revealed.
    Nowhere,
}

impl ItemLocation {
    /// True if the item is carried by the player.
    pub fn is_inventory(&self) -> bool {
        matches!(self, Self::Inventory)
    }
}

/// Terminal status of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Normal play.
    Alive,
    /// The player died; only meta commands are accepted.
    Dead,
    /// The player won; only meta commands are accepted.
    Won,
}

/// The full mutable state of one game session.
///
/// Constructed from a [`WorldDataset`] at game start, replaced wholesale
/// on restart/load, and serialized wholesale on save. All maps are
/// B-tree based so a serialized snapshot is byte-deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    current_room: String,
    items: BTreeMap<String, ItemLocation>,
    open: BTreeMap<String, bool>,
    seeded: BTreeSet<String>,
    room_flags: BTreeMap<String, BTreeMap<String, i64>>,
    globals: BTreeMap<String, i64>,
    score: u32,
    moves: u32,
    status: Status,
    take_awards: BTreeSet<String>,
    case_awards: BTreeSet<String>,
}

impl WorldState {
    /// Build the initial state for a dataset: every item at its starting
    /// location, eagerly-filled containers populated, nothing awarded.
    pub fn new(data: &WorldDataset) -> Self {
        let mut items: BTreeMap<String, ItemLocation> = data
            .items()
            .map(|(id, item)| (id.to_string(), item.start.clone()))
            .collect();

        let mut open = BTreeMap::new();
        let mut seeded = BTreeSet::new();
        for (id, spec) in data.containers() {
            open.insert(id.to_string(), spec.open);
            if !spec.lazy {
                for inner in &spec.contents {
                    items.insert(inner.clone(), ItemLocation::Container(id.to_string()));
                }
                seeded.insert(id.to_string());
            }
        }

        Self {
            current_room: data.start_room().to_string(),
            items,
            open,
            seeded,
            room_flags: BTreeMap::new(),
            globals: BTreeMap::new(),
            score: 0,
            moves: 0,
            status: Status::Alive,
            take_awards: BTreeSet::new(),
            case_awards: BTreeSet::new(),
        }
    }

    /// Reinitialize to the dataset's starting values.
    pub fn reset(&mut self, data: &WorldDataset) {
        *self = Self::new(data);
    }

    // -----------------------------------------------------------------------
    // Player position and terminal status
    // -----------------------------------------------------------------------

    /// The id of the room the player is in.
    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    /// Move the player to another room.
    pub fn set_current_room(&mut self, room: impl Into<String>) {
        self.current_room = room.into();
    }

    /// Terminal status of the session.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Set the terminal status.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    // -----------------------------------------------------------------------
    // Item placement
    // -----------------------------------------------------------------------

    /// Current location of an item. Unknown ids are `Nowhere`.
    pub fn location(&self, item: &str) -> ItemLocation {
        self.items.get(item).cloned().unwrap_or(ItemLocation::Nowhere)
    }

    /// Place an item. This is the only placement primitive: replacing the
    /// single map entry is what keeps an item in at most one collection.
    pub fn place(&mut self, item: &str, loc: ItemLocation) {
        self.items.insert(item.to_string(), loc);
    }

    /// True if the player is carrying the item.
    pub fn is_held(&self, item: &str) -> bool {
        self.location(item).is_inventory()
    }

    /// Item ids currently carried, in stable order.
    pub fn inventory(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(_, loc)| loc.is_inventory())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Item ids lying in a room, in stable order.
    pub fn items_in_room(&self, room: &str) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(_, loc)| matches!(loc, ItemLocation::Room(r) if r == room))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Item ids inside a container, in stable order.
    pub fn contents(&self, container: &str) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(_, loc)| matches!(loc, ItemLocation::Container(c) if c == container))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Containers
    // -----------------------------------------------------------------------

    /// True if the container is open.
    pub fn is_open(&self, container: &str) -> bool {
        self.open.get(container).copied().unwrap_or(false)
    }

    /// Open or close a container.
    pub fn set_open(&mut self, container: &str, open: bool) {
        self.open.insert(container.to_string(), open);
    }

    /// True if a lazily-filled container has already received its
    /// initial contents.
    pub fn is_seeded(&self, container: &str) -> bool {
        self.seeded.contains(container)
    }

    /// Mark a container as seeded. Returns true the first time only, so
    /// the initial content set is established exactly once.
    pub fn mark_seeded(&mut self, container: &str) -> bool {
        self.seeded.insert(container.to_string())
    }

    // -----------------------------------------------------------------------
    // Flags and counters
    // -----------------------------------------------------------------------

    /// Value of a per-room flag/counter. Absent means 0.
    pub fn flag(&self, room: &str, name: &str) -> i64 {
        self.room_flags
            .get(room)
            .and_then(|flags| flags.get(name))
            .copied()
            .unwrap_or(0)
    }

    /// True if a per-room flag is nonzero.
    pub fn flag_set(&self, room: &str, name: &str) -> bool {
        self.flag(room, name) != 0
    }

    /// Set a per-room flag/counter. Other rooms' flags are untouched.
    pub fn set_flag(&mut self, room: &str, name: &str, value: i64) {
        self.room_flags
            .entry(room.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }

    /// Increment a per-room counter and return the new value.
    pub fn bump_flag(&mut self, room: &str, name: &str) -> i64 {
        let next = self.flag(room, name) + 1;
        self.set_flag(room, name, next);
        next
    }

    /// Value of a global flag/counter. Absent means 0.
    pub fn global(&self, name: &str) -> i64 {
        self.globals.get(name).copied().unwrap_or(0)
    }

    /// True if a global flag is nonzero.
    pub fn global_set(&self, name: &str) -> bool {
        self.global(name) != 0
    }

    /// Set a global flag/counter.
    pub fn set_global(&mut self, name: &str, value: i64) {
        self.globals.insert(name.to_string(), value);
    }

    // -----------------------------------------------------------------------
    // Score and moves
    // -----------------------------------------------------------------------

    /// Accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Accepted-command count.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Count one accepted command.
    pub fn record_move(&mut self) {
        self.moves += 1;
    }

    /// Grant the take-award for a treasure. Returns the points the first
    /// time, and `None` on any repeat.
    pub fn award_take(&mut self, item: &str, points: u32) -> Option<u32> {
        if self.take_awards.insert(item.to_string()) {
            self.score += points;
            Some(points)
        } else {
            None
        }
    }

    /// Grant the case-award for a treasure. Returns the points the first
    /// time, and `None` on any repeat.
    pub fn award_case(&mut self, item: &str, points: u32) -> Option<u32> {
        if self.case_awards.insert(item.to_string()) {
            self.score += points;
            Some(points)
        } else {
            None
        }
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Serialize the whole state document. Byte-deterministic for equal
    /// states because every collection is ordered.
    pub fn serialize(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::Snapshot(e.to_string()))
    }

    /// Restore a state document from [`WorldState::serialize`] output.
    pub fn deserialize(snapshot: &str) -> CoreResult<Self> {
        serde_json::from_str(snapshot).map_err(|e| CoreError::Snapshot(e.to_string()))
    }
}
