//! Core game logic, free of terminal and timing concerns.
//!
//! Everything in here is deterministic apart from food placement, so the
//! whole module is exercised directly by unit tests.

pub mod config;
pub mod direction;
pub mod state;

pub use config::GameConfig;
pub use direction::Direction;
pub use state::{Cell, Collision, GameState, TickOutcome};
