//! # Poker Ledger
//!
//! A personal poker session tracker with zero-sum settlement bookkeeping.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, player results, aggregates)
//! - **ledger**: Ordered game collection with settlement validation
//! - **calculate**: Roster arithmetic (deltas, recompute, sorting)
//! - **tracker**: Application state tying ledger, roster and storage together
//! - **storage**: JSON snapshot persistence
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod tracker;

pub use models::*;

/// Parse a `NAME=BALANCE` pair (e.g. "Alice=50", "Bob=-12.5").
pub fn parse_player_entry(s: &str) -> Option<PlayerResult> {
    let (name, balance) = s.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let balance: f64 = balance.trim().parse().ok()?;
    Some(PlayerResult::new(name, balance))
}
