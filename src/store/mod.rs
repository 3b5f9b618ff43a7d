//! Record store: where players and matches live. The ladder logic only talks to `RecordStore`.

mod memory;

pub use memory::MemoryStore;

use crate::models::{Band, LadderError, Player, PlayerId, TennisMatch};

/// Durable storage for player and match records.
///
/// Reads return records sorted the way the ladder needs them; writes are single-row
/// except `shift_positions`, which may be one bulk statement or a loop.
pub trait RecordStore {
    fn get_player(&self, id: PlayerId) -> Result<Option<Player>, LadderError>;

    /// All players, sorted by band then position.
    fn list_players(&self) -> Result<Vec<Player>, LadderError>;

    /// Players of one band, sorted by position.
    fn list_players_by_band(&self, band: Band) -> Result<Vec<Player>, LadderError>;

    fn insert_player(&mut self, player: Player) -> Result<(), LadderError>;

    /// Overwrite a player's profile, points and rank snapshot. Band and position are left untouched.
    fn update_player(&mut self, player: &Player) -> Result<(), LadderError>;

    fn update_player_position(
        &mut self,
        id: PlayerId,
        band: Band,
        position: u32,
    ) -> Result<(), LadderError>;

    /// Add `delta` to the position of every player in `band` with position in `start..=end`
    /// (`end = None` means open-ended). Returns the number of rows shifted.
    fn shift_positions(
        &mut self,
        band: Band,
        start: u32,
        end: Option<u32>,
        delta: i32,
    ) -> Result<usize, LadderError>;

    fn remove_player(&mut self, id: PlayerId) -> Result<Option<Player>, LadderError>;

    fn clear_players(&mut self) -> Result<usize, LadderError>;

    fn insert_match(&mut self, game: TennisMatch) -> Result<(), LadderError>;

    /// All matches, most recent match date first.
    fn list_matches(&self) -> Result<Vec<TennisMatch>, LadderError>;

    fn clear_matches(&mut self) -> Result<usize, LadderError>;
}
