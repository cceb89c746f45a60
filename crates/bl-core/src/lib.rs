//! Core types for Brasslantern: the static world dataset, the mutable
//! world state store, and whole-state snapshots.
//!
//! This crate knows nothing about verbs, parsing, or narration. It owns
//! the two documents every session is built from:
//!
//! - [`WorldDataset`]: rooms, actions, items, containers, and scoring
//!   tables, loaded once from JSON and immutable afterwards.
//! - [`WorldState`]: everything that changes during play, replaced
//!   wholesale on restart and round-tripped losslessly on save/load.

pub mod dataset;
pub mod error;
pub mod state;

pub use dataset::{
    Action, ActionRule, AltDescription, ContainerSpec, CounterReveal, FlagCheck, Guardian,
    Item, ItemCheck, LightKind, Room, TreasureScore, WorldDataset, GLOBAL_FLAG_PREFIX,
};
pub use error::{CoreError, CoreResult};
pub use state::{ItemLocation, Status, WorldState};
