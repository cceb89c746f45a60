//! Free-text command parsing: normalization, verb tables, and noun
//! resolution.

mod command;
mod resolver;

pub use command::{Command, Direction, Verb, normalize, parse_command, split_on};
pub use resolver::resolve_item;
