//! The Brasslantern game engine.
//!
//! Free text goes in, narration comes out. The engine normalizes a
//! line into a canonical verb and argument, runs the matching handler
//! against the world state, and narrates the result. Accepted commands
//! mutate the state exactly once; refused preconditions leave it
//! byte-identical when serialized.
//!
//! The session is synchronous and single-player: no interior
//! mutability, no threads, one [`GameSession::process`] call per turn.

pub mod config;
pub mod error;
pub mod gateway;
pub mod narrator;
pub mod parser;

mod handlers;
mod session;

pub use config::GameConfig;
pub use error::{EngineError, EngineResult};
pub use gateway::{MemorySlot, SaveGateway};
pub use session::GameSession;
