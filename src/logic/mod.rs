//! Ladder business logic: band reordering, roster writes, leaderboard, statistics.

mod ranking;
mod reorder;
mod roster;
mod stats;

pub use ranking::{current_rank, filter_ranked, project, RankedPlayer, Trend};
pub use reorder::{
    apply_match_result, check_band, check_density, move_player, quick_move, reorganize_all,
    reorganize_band, MatchOutcome,
};
pub use roster::{
    delete_all_matches, delete_all_players, delete_player, record_match, register_player,
    update_profile, RecordedMatch,
};
pub use stats::{parse_score, player_stats, PlayerStats, ScoreLine};
