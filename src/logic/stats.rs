//! Per-player statistics from recorded matches: matches, games and sets won/lost.

use crate::models::{PlayerId, TennisMatch};
use serde::Serialize;

/// Games and sets in one score string, from player 1's perspective.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScoreLine {
    pub player1_games: u32,
    pub player2_games: u32,
    pub player1_sets: u32,
    pub player2_sets: u32,
}

impl ScoreLine {
    pub fn total_sets(&self) -> u32 {
        self.player1_sets.saturating_add(self.player2_sets)
    }

    pub fn total_games(&self) -> u32 {
        self.player1_games.saturating_add(self.player2_games)
    }
}

/// Parse "6-4, 6-2", "6-4 6-2" or "6-4,6-2". Sets that are not `a-b` numbers are skipped.
/// Counters saturate at `u32::MAX`: scores are free text.
pub fn parse_score(score: &str) -> ScoreLine {
    score
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|set| {
            let (a, b) = set.split_once('-')?;
            Some((a.trim().parse::<u32>().ok()?, b.trim().parse::<u32>().ok()?))
        })
        .fold(ScoreLine::default(), |mut line, (p1, p2)| {
            line.player1_games = line.player1_games.saturating_add(p1);
            line.player2_games = line.player2_games.saturating_add(p2);
            if p1 > p2 {
                line.player1_sets = line.player1_sets.saturating_add(1);
            } else {
                line.player2_sets = line.player2_sets.saturating_add(1);
            }
            line
        })
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub total_matches: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub win_percentage: f64,
    pub total_games: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub game_win_percentage: f64,
    pub total_sets: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub set_win_percentage: f64,
}

fn percentage(won: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(won) / f64::from(total) * 100.0
    }
}

/// Aggregate every match `player` took part in.
pub fn player_stats(player: PlayerId, matches: &[TennisMatch]) -> PlayerStats {
    let mut stats = PlayerStats::default();
    for m in matches.iter().filter(|m| m.involves(player)) {
        stats.total_matches += 1;
        if m.winner == player {
            stats.matches_won += 1;
        }
        let line = parse_score(&m.score);
        stats.total_games = stats.total_games.saturating_add(line.total_games());
        stats.total_sets = stats.total_sets.saturating_add(line.total_sets());
        let (games, sets) = if m.player1 == player {
            (line.player1_games, line.player1_sets)
        } else {
            (line.player2_games, line.player2_sets)
        };
        stats.games_won = stats.games_won.saturating_add(games);
        stats.sets_won = stats.sets_won.saturating_add(sets);
    }
    stats.matches_lost = stats.total_matches - stats.matches_won;
    stats.games_lost = stats.total_games.saturating_sub(stats.games_won);
    stats.sets_lost = stats.total_sets.saturating_sub(stats.sets_won);
    stats.win_percentage = percentage(stats.matches_won, stats.total_matches);
    stats.game_win_percentage = percentage(stats.games_won, stats.total_games);
    stats.set_win_percentage = percentage(stats.sets_won, stats.total_sets);
    stats
}
