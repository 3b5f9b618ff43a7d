//! Roster and match registration: the writes that are not pure band moves.

use crate::config::{LadderConfig, MatchPolicy};
use crate::logic::ranking::current_rank;
use crate::logic::reorder::{apply_match_result, check_band, MatchOutcome};
use crate::models::{LadderError, NewMatch, NewPlayer, Player, PlayerId, ProfileUpdate, TennisMatch};
use crate::store::RecordStore;
use log::{info, warn};
use serde::Serialize;

/// Register a player at the end of their band (entry band unless the form names one).
pub fn register_player(
    store: &mut impl RecordStore,
    config: &LadderConfig,
    new: NewPlayer,
) -> Result<Player, LadderError> {
    new.validate()?;
    let band = new.band.unwrap_or(config.entry_band);
    check_band(store, band)?;
    let position = u32::try_from(store.list_players_by_band(band)?.len())
        .map_err(|_| LadderError::Store(format!("band {band} is full")))?
        + 1;

    let player = Player::new(new, band, position);
    store.insert_player(player.clone())?;
    info!(
        "Registered {} in band {band} position {position}",
        player.full_name()
    );

    let max_players = config.bands.get(band).max_players;
    if position > max_players {
        warn!("Band {band} now has {position} players (soft max {max_players})");
    }
    Ok(player)
}

/// Edit profile fields and points. The ladder slot is not touched.
pub fn update_profile(
    store: &mut impl RecordStore,
    id: PlayerId,
    update: ProfileUpdate,
) -> Result<Player, LadderError> {
    let mut player = store.get_player(id)?.ok_or(LadderError::NotFound(id))?;
    update.apply_to(&mut player)?;
    store.update_player(&player)?;
    Ok(player)
}

/// Remove a player and close the gap they leave in their band.
pub fn delete_player(store: &mut impl RecordStore, id: PlayerId) -> Result<Player, LadderError> {
    let player = store.get_player(id)?.ok_or(LadderError::NotFound(id))?;
    check_band(store, player.band)?;
    store.remove_player(id)?;
    store.shift_positions(player.band, player.position + 1, None, -1)?;
    info!(
        "Deleted {} (was band {} position {})",
        player.full_name(),
        player.band,
        player.position
    );
    Ok(player)
}

pub fn delete_all_players(store: &mut impl RecordStore) -> Result<usize, LadderError> {
    let removed = store.clear_players()?;
    info!("Deleted all {removed} player(s)");
    Ok(removed)
}

pub fn delete_all_matches(store: &mut impl RecordStore) -> Result<usize, LadderError> {
    let removed = store.clear_matches()?;
    info!("Deleted all {removed} match(es)");
    Ok(removed)
}

/// A stored match plus what it did to the ladder.
#[derive(Clone, Debug, Serialize)]
pub struct RecordedMatch {
    #[serde(rename = "match")]
    pub game: TennisMatch,
    pub outcome: MatchOutcome,
}

/// Store a match, credit the winner, and re-rank if the policy says so.
///
/// The winner's current leaderboard rank is saved as `previous_rank` before the points are
/// added so the leaderboard can show the trend. Both players must exist.
pub fn record_match(
    store: &mut impl RecordStore,
    config: &LadderConfig,
    new: NewMatch,
) -> Result<RecordedMatch, LadderError> {
    new.validate()?;
    let players = store.list_players()?;
    for id in [new.player1, new.player2] {
        if !players.iter().any(|p| p.id == id) {
            return Err(LadderError::NotFound(id));
        }
    }

    let game = TennisMatch::new(new, config.points_per_win);
    let mut winner = store
        .get_player(game.winner)?
        .ok_or(LadderError::NotFound(game.winner))?;
    // Only the winner's snapshot is refreshed; everyone else keeps their last one.
    winner.previous_rank = current_rank(&players, winner.id);
    winner.points = winner.points.saturating_add(game.points_awarded);

    let outcome = match config.match_policy {
        MatchPolicy::PointsOnly => MatchOutcome::Unchanged,
        MatchPolicy::BandChallenge => {
            apply_match_result(store, game.winner, game.player1, game.player2)?
        }
    };
    store.update_player(&winner)?;
    store.insert_match(game.clone())?;

    info!(
        "Recorded match {} ({}): {} +{} pts, outcome {:?}",
        game.id,
        game.score,
        winner.full_name(),
        game.points_awarded,
        outcome
    );
    Ok(RecordedMatch { game, outcome })
}
