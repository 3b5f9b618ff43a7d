//! Tennis club band ladder: library with models, record store and ladder logic.

pub mod auth;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use auth::{AdminCredential, ADMIN_SESSION_KEY};
pub use config::{LadderConfig, MatchPolicy};
pub use logic::{
    apply_match_result, check_band, check_density, current_rank, delete_all_matches,
    delete_all_players, delete_player, filter_ranked, move_player, parse_score, player_stats,
    project, quick_move, record_match, register_player, reorganize_all, reorganize_band,
    update_profile, MatchOutcome, PlayerStats, RankedPlayer, RecordedMatch, ScoreLine, Trend,
};
pub use models::{
    Band, BandSetting, BandSettingUpdate, BandSettings, Direction, LadderError, MatchId, NewMatch,
    NewPlayer, Player, PlayerId, ProfileUpdate, TennisMatch,
};
pub use store::{MemoryStore, RecordStore};
