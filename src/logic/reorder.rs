//! Band reordering: manual moves, quick moves, match-driven promotion, and band repair.
//!
//! Every band holds positions exactly 1..=N. Each operation checks that for the bands it
//! touches, validates its target, then writes: range shifts first, the moved player last.

use crate::models::{Band, Direction, LadderError, Player, PlayerId};
use crate::store::RecordStore;
use log::{debug, info};
use serde::Serialize;

/// What a match result did to the ladder.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchOutcome {
    /// Positions untouched (winner already ahead, or bands do not allow a challenge).
    Unchanged,
    /// Same band: winner jumped into the loser's slot; the loser and everyone between drop one.
    Overtook { band: Band, from: u32, to: u32 },
    /// The top player of a worse band beat someone from a better band: they trade bands.
    Promoted { winner_band: Band, loser_band: Band },
}

/// Fail with `InvariantViolation` unless `players` (all of one band) occupy exactly 1..=N.
pub fn check_density(band: Band, players: &[Player]) -> Result<(), LadderError> {
    let mut positions: Vec<u32> = players.iter().map(|p| p.position).collect();
    positions.sort_unstable();
    if positions.iter().zip(1u32..).all(|(&p, expected)| p == expected) {
        Ok(())
    } else {
        Err(LadderError::InvariantViolation { band, positions })
    }
}

/// Check one band in the store.
pub fn check_band(store: &impl RecordStore, band: Band) -> Result<(), LadderError> {
    dense_band(store, band).map(|_| ())
}

/// Players of `band` sorted by position, refusing if the band is not dense.
fn dense_band(store: &impl RecordStore, band: Band) -> Result<Vec<Player>, LadderError> {
    let players = store.list_players_by_band(band)?;
    check_density(band, &players)?;
    Ok(players)
}

fn require_player(store: &impl RecordStore, id: PlayerId) -> Result<Player, LadderError> {
    store.get_player(id)?.ok_or(LadderError::NotFound(id))
}

fn occupancy(players: &[Player]) -> u32 {
    u32::try_from(players.len()).unwrap_or(u32::MAX)
}

/// Move a player to `target_position` in `target_band`, renumbering everyone affected.
///
/// Same band: the players between the old and new slot shift one step towards the old slot.
/// Cross band: the old band closes its gap, the new band opens a slot at `target_position`.
/// A same-band target must be an occupied position; a cross-band target may also be N + 1.
pub fn move_player(
    store: &mut impl RecordStore,
    player_id: PlayerId,
    target_band: Band,
    target_position: u32,
) -> Result<(), LadderError> {
    let player = require_player(store, player_id)?;
    if target_position == 0 {
        return Err(LadderError::InvalidTarget(
            "position must be at least 1".to_string(),
        ));
    }
    if player.band == target_band && player.position == target_position {
        debug!("{} already at band {target_band} position {target_position}", player.full_name());
        return Ok(());
    }

    let source = dense_band(store, player.band)?;
    let (old_band, old) = (player.band, player.position);

    if old_band == target_band {
        let last = occupancy(&source);
        if target_position > last {
            return Err(LadderError::InvalidTarget(format!(
                "band {target_band} has {last} players, cannot move to position {target_position}"
            )));
        }
        if old < target_position {
            store.shift_positions(old_band, old + 1, Some(target_position), -1)?;
        } else {
            store.shift_positions(old_band, target_position, Some(old - 1), 1)?;
        }
    } else {
        let target = dense_band(store, target_band)?;
        let end = occupancy(&target) + 1;
        if target_position > end {
            return Err(LadderError::InvalidTarget(format!(
                "band {target_band} has {} players, cannot insert at position {target_position}",
                end - 1
            )));
        }
        store.shift_positions(old_band, old + 1, None, -1)?;
        store.shift_positions(target_band, target_position, None, 1)?;
    }
    store.update_player_position(player_id, target_band, target_position)?;

    info!(
        "Moved {} from band {old_band} position {old} to band {target_band} position {target_position}",
        player.full_name()
    );
    Ok(())
}

/// One step up or down the ladder, crossing into the neighbouring band at its edge.
///
/// `Up` from position 1 joins the band above at its end; `Down` from the last position joins
/// the band below at position 1. No-op at the very top and the very bottom.
pub fn quick_move(
    store: &mut impl RecordStore,
    player_id: PlayerId,
    direction: Direction,
) -> Result<(), LadderError> {
    let player = require_player(store, player_id)?;
    let band_size = occupancy(&dense_band(store, player.band)?);

    match direction {
        Direction::Up if player.position > 1 => {
            move_player(store, player_id, player.band, player.position - 1)
        }
        Direction::Up => match player.band.better() {
            Some(upper) => {
                let end = occupancy(&dense_band(store, upper)?) + 1;
                move_player(store, player_id, upper, end)
            }
            None => {
                debug!("{} is already top of the ladder", player.full_name());
                Ok(())
            }
        },
        Direction::Down if player.position < band_size => {
            move_player(store, player_id, player.band, player.position + 1)
        }
        Direction::Down => match player.band.worse() {
            Some(lower) => move_player(store, player_id, lower, 1),
            None => {
                debug!("{} is already bottom of the ladder", player.full_name());
                Ok(())
            }
        },
    }
}

/// Re-rank after a match between `player1` and `player2` won by `winner_id`.
///
/// - Same band, winner below the loser: winner takes the loser's position (as `move_player`).
/// - Winner is position 1 of a worse band than the loser: winner joins the loser's band after
///   its last occupant, loser takes position 1 of the winner's old band.
/// - Anything else: unchanged.
///
/// Both players are resolved and every touched band checked before the first write.
pub fn apply_match_result(
    store: &mut impl RecordStore,
    winner_id: PlayerId,
    player1: PlayerId,
    player2: PlayerId,
) -> Result<MatchOutcome, LadderError> {
    if player1 == player2 {
        return Err(LadderError::InvalidMatch(
            "a match needs two different players".to_string(),
        ));
    }
    let loser_id = if winner_id == player1 {
        player2
    } else if winner_id == player2 {
        player1
    } else {
        return Err(LadderError::InvalidMatch(
            "the winner must be one of the two players".to_string(),
        ));
    };
    let winner = require_player(store, winner_id)?;
    let loser = require_player(store, loser_id)?;

    if winner.band == loser.band {
        if winner.position <= loser.position {
            return Ok(MatchOutcome::Unchanged);
        }
        move_player(store, winner_id, winner.band, loser.position)?;
        return Ok(MatchOutcome::Overtook {
            band: winner.band,
            from: winner.position,
            to: loser.position,
        });
    }

    if winner.band > loser.band && winner.position == 1 {
        let (upper, lower) = (loser.band, winner.band);
        let upper_players = dense_band(store, upper)?;
        dense_band(store, lower)?;

        // Upper band: loser leaves, gap closes, winner appends after the last occupant.
        // Lower band: loser fills the slot 1 the winner vacates, nobody else moves.
        store.shift_positions(upper, loser.position + 1, None, -1)?;
        store.update_player_position(loser_id, lower, 1)?;
        store.update_player_position(winner_id, upper, occupancy(&upper_players))?;

        info!(
            "{} promoted to band {upper}, {} relegated to band {lower}",
            winner.full_name(),
            loser.full_name()
        );
        return Ok(MatchOutcome::Promoted {
            winner_band: upper,
            loser_band: lower,
        });
    }

    debug!(
        "No re-ranking: {} (band {} position {}) beat {} (band {} position {})",
        winner.full_name(),
        winner.band,
        winner.position,
        loser.full_name(),
        loser.band,
        loser.position
    );
    Ok(MatchOutcome::Unchanged)
}

/// Renumber a band to 1..=N keeping its current order. Repairs gaps and duplicates
/// (duplicates are ordered by last name, then id). Returns how many rows changed.
pub fn reorganize_band(store: &mut impl RecordStore, band: Band) -> Result<usize, LadderError> {
    let players = store.list_players_by_band(band)?;
    let mut changed = 0;
    for (player, position) in players.iter().zip(1u32..) {
        if player.position != position {
            store.update_player_position(player.id, band, position)?;
            changed += 1;
        }
    }
    if changed > 0 {
        info!("Reorganized band {band}: {changed} position(s) renumbered");
    }
    Ok(changed)
}

/// `reorganize_band` for all four bands.
pub fn reorganize_all(store: &mut impl RecordStore) -> Result<usize, LadderError> {
    let mut changed = 0;
    for band in Band::ALL {
        changed += reorganize_band(store, band)?;
    }
    Ok(changed)
}
