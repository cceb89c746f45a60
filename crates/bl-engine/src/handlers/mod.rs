//! Verb handlers, grouped by concern. Each module adds `do_*` methods
//! to [`crate::GameSession`].

mod fixtures;
mod items;
mod meta;
mod movement;
mod puzzles;
