//! Core data models for the session tracker.

mod game;
mod ids;
mod player;

pub use game::*;
pub use ids::*;
pub use player::*;
