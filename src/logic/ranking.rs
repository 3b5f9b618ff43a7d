//! Leaderboard: global ranking by points with a trend against the stored previous rank.

use crate::models::{Player, PlayerId};
use serde::Serialize;

/// Movement compared to the player's previous rank.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Same,
}

impl Trend {
    /// `Same` when no previous rank was recorded (0 counts as unrecorded).
    pub fn between(previous_rank: Option<u32>, rank: u32) -> Self {
        match previous_rank {
            Some(previous) if previous > 0 && rank < previous => Trend::Up,
            Some(previous) if previous > 0 && rank > previous => Trend::Down,
            _ => Trend::Same,
        }
    }
}

/// A player with their leaderboard rank (1-based) and trend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankedPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub rank: u32,
    pub trend: Trend,
}

/// Sort by points descending (stable: ties keep input order) and number from 1.
pub fn project(players: &[Player]) -> Vec<RankedPlayer> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points));
    sorted
        .into_iter()
        .zip(1u32..)
        .map(|(player, rank)| RankedPlayer {
            player: player.clone(),
            rank,
            trend: Trend::between(player.previous_rank, rank),
        })
        .collect()
}

/// Current leaderboard rank of one player, if present.
pub fn current_rank(players: &[Player], id: PlayerId) -> Option<u32> {
    project(players)
        .into_iter()
        .find(|r| r.player.id == id)
        .map(|r| r.rank)
}

/// Case-insensitive search on full name or nationality. Ranks are those of the full projection.
pub fn filter_ranked(ranked: &[RankedPlayer], query: &str) -> Vec<RankedPlayer> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return ranked.to_vec();
    }
    ranked
        .iter()
        .filter(|r| {
            r.player.full_name().to_lowercase().contains(&query)
                || r.player.nationality.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
