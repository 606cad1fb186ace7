//! Settlement and roster arithmetic.
//!
//! Pure functions over games and player aggregates:
//! - zero-sum settlement checks and total-value derivation
//! - incremental roster maintenance (`apply_delta`)
//! - full recomputation from the ledger (`recompute_roster`)
//! - stable roster sorting
//!
//! Incremental and full recomputation must always agree; the incremental
//! path only exists to make each mutation O(players-in-game) instead of
//! O(all games).

use serde::{Deserialize, Serialize};

use crate::models::{Game, Player, PlayerResult};

/// Tolerance for the zero-sum settlement check. Balances are entered by
/// hand, so anything under a cent counts as zero.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// Signed sum of player balances. Zero for a correct settlement.
pub fn settlement_offset(players: &[PlayerResult]) -> f64 {
    players.iter().map(|p| p.balance).sum()
}

/// Whether the balances net to zero within [`SETTLEMENT_EPSILON`].
pub fn is_settled(players: &[PlayerResult]) -> bool {
    settlement_offset(players).abs() < SETTLEMENT_EPSILON
}

/// Total money that changed hands: half the sum of absolute balances.
pub fn total_value(players: &[PlayerResult]) -> f64 {
    players.iter().map(|p| p.balance.abs()).sum::<f64>() / 2.0
}

/// Direction of a roster adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    /// A game was added (or is the new side of an edit).
    Apply,
    /// A game was deleted (or is the old side of an edit).
    Revert,
}

/// Fold one game into the roster.
///
/// Each participant's counters move by one game and their balance from this
/// game. Unknown names are created on `Apply` only; anyone whose game count
/// reaches zero is dropped from the roster rather than kept as a zero row.
pub fn apply_delta(roster: &mut Vec<Player>, game: &Game, delta: Delta) {
    for result in &game.players {
        match roster.iter_mut().find(|p| p.name == result.name) {
            Some(player) => match delta {
                Delta::Apply => {
                    player.games += 1;
                    player.balance += result.balance;
                }
                Delta::Revert => {
                    player.games = player.games.saturating_sub(1);
                    player.balance -= result.balance;
                }
            },
            None => {
                if delta == Delta::Apply {
                    roster.push(Player::new(result.name.clone(), 1, result.balance));
                }
            }
        }
    }
    roster.retain(|p| p.games > 0);
}

/// Rebuild the roster from scratch by replaying every game.
///
/// The ledger stores games most recent first; replay walks oldest first so
/// that first-seen ordering matches what incremental bookkeeping produced.
pub fn recompute_roster(games: &[Game]) -> Vec<Player> {
    let mut roster = Vec::new();
    for game in games.iter().rev() {
        apply_delta(&mut roster, game, Delta::Apply);
    }
    roster
}

/// Column to sort the roster by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Games,
    Balance,
}

impl SortKey {
    /// Parse a user-supplied sort key.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "games" => Some(SortKey::Games),
            "balance" => Some(SortKey::Balance),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortOrder {
    /// Parse a user-supplied order string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Asc),
            "desc" | "descending" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Sort the roster by one column, stably: rows that compare equal keep
/// their insertion order in either direction.
pub fn sort_roster(roster: &mut [Player], key: SortKey, order: SortOrder) {
    roster.sort_by(|a, b| {
        let ord = match key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Games => a.games.cmp(&b.games),
            SortKey::Balance => a.balance.total_cmp(&b.balance),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameType;
    use pretty_assertions::assert_eq;

    fn game(players: &[(&str, f64)]) -> Game {
        Game::new(
            GameType::CashGame,
            players
                .iter()
                .map(|(n, b)| PlayerResult::new(*n, *b))
                .collect(),
        )
    }

    fn sorted_by_name(mut roster: Vec<Player>) -> Vec<Player> {
        roster.sort_by(|a, b| a.name.cmp(&b.name));
        roster
    }

    #[test]
    fn test_settlement_offset_and_is_settled() {
        let players = vec![
            PlayerResult::new("Alice", 50.0),
            PlayerResult::new("Bob", -50.0),
        ];
        assert!(settlement_offset(&players).abs() < 1e-9);
        assert!(is_settled(&players));

        let off = vec![
            PlayerResult::new("Alice", 50.0),
            PlayerResult::new("Bob", -40.0),
        ];
        assert!((settlement_offset(&off) - 10.0).abs() < 1e-9);
        assert!(!is_settled(&off));
    }

    #[test]
    fn test_is_settled_float_noise_tolerated() {
        // 0.1 + 0.2 - 0.3 style drift stays under the epsilon
        let players = vec![
            PlayerResult::new("A", 0.1),
            PlayerResult::new("B", 0.2),
            PlayerResult::new("C", -0.3),
        ];
        assert!(is_settled(&players));
    }

    #[test]
    fn test_is_settled_rejects_at_epsilon() {
        let players = vec![
            PlayerResult::new("A", 0.01),
            PlayerResult::new("B", 0.0),
        ];
        assert!(!is_settled(&players));
    }

    #[test]
    fn test_total_value() {
        let players = vec![
            PlayerResult::new("Alice", 50.0),
            PlayerResult::new("Bob", -30.0),
            PlayerResult::new("Carol", -20.0),
        ];
        assert_eq!(total_value(&players), 50.0);
        assert_eq!(total_value(&[]), 0.0);
    }

    #[test]
    fn test_apply_creates_players() {
        let mut roster = Vec::new();
        apply_delta(&mut roster, &game(&[("Alice", 50.0), ("Bob", -50.0)]), Delta::Apply);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0], Player::new("Alice", 1, 50.0));
        assert_eq!(roster[1], Player::new("Bob", 1, -50.0));
    }

    #[test]
    fn test_apply_accumulates_existing_players() {
        let mut roster = Vec::new();
        apply_delta(&mut roster, &game(&[("Alice", 50.0), ("Bob", -50.0)]), Delta::Apply);
        apply_delta(&mut roster, &game(&[("Alice", -20.0), ("Bob", 20.0)]), Delta::Apply);

        assert_eq!(roster[0], Player::new("Alice", 2, 30.0));
        assert_eq!(roster[1], Player::new("Bob", 2, -30.0));
    }

    #[test]
    fn test_revert_removes_last_game_players() {
        let g = game(&[("Alice", 50.0), ("Bob", -50.0)]);
        let mut roster = Vec::new();
        apply_delta(&mut roster, &g, Delta::Apply);
        apply_delta(&mut roster, &g, Delta::Revert);

        assert!(roster.is_empty());
    }

    #[test]
    fn test_revert_keeps_players_with_other_games() {
        let g1 = game(&[("Alice", 50.0), ("Bob", -50.0)]);
        let g2 = game(&[("Alice", 10.0), ("Carol", -10.0)]);
        let mut roster = Vec::new();
        apply_delta(&mut roster, &g1, Delta::Apply);
        apply_delta(&mut roster, &g2, Delta::Apply);
        apply_delta(&mut roster, &g2, Delta::Revert);

        assert_eq!(
            roster,
            vec![Player::new("Alice", 1, 50.0), Player::new("Bob", 1, -50.0)]
        );
    }

    #[test]
    fn test_revert_unknown_name_is_ignored() {
        // A revert for a name no longer on the roster must not create it.
        let mut roster = vec![Player::new("Alice", 1, 50.0)];
        apply_delta(&mut roster, &game(&[("Ghost", -50.0), ("Alice", 50.0)]), Delta::Revert);

        assert_eq!(roster, Vec::<Player>::new());
    }

    #[test]
    fn test_no_zero_game_rows_survive() {
        let g = game(&[("Alice", 0.0)]);
        let mut roster = Vec::new();
        apply_delta(&mut roster, &g, Delta::Apply);
        apply_delta(&mut roster, &g, Delta::Revert);

        assert!(roster.iter().all(|p| p.games > 0));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_recompute_empty_ledger() {
        assert!(recompute_roster(&[]).is_empty());
    }

    #[test]
    fn test_recompute_matches_incremental_after_adds() {
        let games = vec![
            game(&[("Alice", 10.0), ("Bob", -10.0)]),
            game(&[("Bob", 25.0), ("Carol", -25.0)]),
            game(&[("Alice", -5.0), ("Carol", 5.0)]),
        ];

        // Incremental path: newest game is inserted at the front, so apply
        // in chronological order while building the ledger front-first.
        let mut ledger: Vec<Game> = Vec::new();
        let mut incremental = Vec::new();
        for g in &games {
            ledger.insert(0, g.clone());
            apply_delta(&mut incremental, g, Delta::Apply);
        }

        assert_eq!(
            sorted_by_name(incremental),
            sorted_by_name(recompute_roster(&ledger))
        );
    }

    #[test]
    fn test_recompute_matches_incremental_after_edit_and_delete() {
        let g1 = game(&[("Alice", 50.0), ("Bob", -50.0)]);
        let g2 = game(&[("Alice", 20.0), ("Carol", -20.0)]);
        let g3 = game(&[("Bob", 15.0), ("Dave", -15.0)]);

        let mut ledger = vec![g3.clone(), g2.clone(), g1.clone()];
        let mut incremental = Vec::new();
        apply_delta(&mut incremental, &g1, Delta::Apply);
        apply_delta(&mut incremental, &g2, Delta::Apply);
        apply_delta(&mut incremental, &g3, Delta::Apply);

        // Edit g2: Carol replaced by Eve. Revert old, apply new.
        let g2_new = game(&[("Alice", 30.0), ("Eve", -30.0)]).with_id(g2.id.clone());
        apply_delta(&mut incremental, &g2, Delta::Revert);
        apply_delta(&mut incremental, &g2_new, Delta::Apply);
        ledger[1] = g2_new;

        // Delete g1.
        apply_delta(&mut incremental, &g1, Delta::Revert);
        ledger.retain(|g| g.id != g1.id);

        assert_eq!(
            sorted_by_name(incremental),
            sorted_by_name(recompute_roster(&ledger))
        );
        // Carol participated only in the old version of g2; she must be gone.
        assert!(!recompute_roster(&ledger).iter().any(|p| p.name == "Carol"));
    }

    #[test]
    fn test_sort_roster_by_balance_desc() {
        let mut roster = vec![
            Player::new("Alice", 2, 10.0),
            Player::new("Bob", 1, 50.0),
            Player::new("Carol", 3, -20.0),
        ];
        sort_roster(&mut roster, SortKey::Balance, SortOrder::Desc);
        let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Carol"]);
    }

    #[test]
    fn test_sort_roster_by_name_asc() {
        let mut roster = vec![
            Player::new("Carol", 1, 0.0),
            Player::new("Alice", 1, 0.0),
            Player::new("Bob", 1, 0.0),
        ];
        sort_roster(&mut roster, SortKey::Name, SortOrder::Asc);
        let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_sort_roster_ties_keep_insertion_order() {
        let mut roster = vec![
            Player::new("First", 2, 5.0),
            Player::new("Second", 2, 5.0),
            Player::new("Third", 2, 5.0),
        ];
        let original: Vec<String> = roster.iter().map(|p| p.name.clone()).collect();

        sort_roster(&mut roster, SortKey::Games, SortOrder::Desc);
        let after: Vec<String> = roster.iter().map(|p| p.name.clone()).collect();
        assert_eq!(original, after);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("balance"), Some(SortKey::Balance));
        assert_eq!(SortKey::parse("Games"), Some(SortKey::Games));
        assert_eq!(SortKey::parse("name"), Some(SortKey::Name));
        assert_eq!(SortKey::parse("stack"), None);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("descending"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("sideways"), None);
    }
}
