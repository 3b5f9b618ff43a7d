//! In-memory record store used by the web server and the tests.

use crate::models::{Band, LadderError, Player, PlayerId, TennisMatch};
use crate::store::RecordStore;
use std::collections::HashMap;

/// Players by id plus matches in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    players: HashMap<PlayerId, Player>,
    matches: Vec<TennisMatch>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing rows as-is (no position checks).
    pub fn with_players(players: impl IntoIterator<Item = Player>) -> Self {
        Self {
            players: players.into_iter().map(|p| (p.id, p)).collect(),
            matches: Vec::new(),
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, LadderError> {
        self.players.get_mut(&id).ok_or(LadderError::NotFound(id))
    }
}

fn ladder_order(a: &Player, b: &Player) -> std::cmp::Ordering {
    (a.band, a.position, &a.last_name, a.id).cmp(&(b.band, b.position, &b.last_name, b.id))
}

impl RecordStore for MemoryStore {
    fn get_player(&self, id: PlayerId) -> Result<Option<Player>, LadderError> {
        Ok(self.players.get(&id).cloned())
    }

    fn list_players(&self) -> Result<Vec<Player>, LadderError> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by(ladder_order);
        Ok(players)
    }

    fn list_players_by_band(&self, band: Band) -> Result<Vec<Player>, LadderError> {
        let mut players: Vec<Player> = self
            .players
            .values()
            .filter(|p| p.band == band)
            .cloned()
            .collect();
        players.sort_by(ladder_order);
        Ok(players)
    }

    fn insert_player(&mut self, player: Player) -> Result<(), LadderError> {
        if self.players.contains_key(&player.id) {
            return Err(LadderError::Store(format!("duplicate player id {}", player.id)));
        }
        self.players.insert(player.id, player);
        Ok(())
    }

    fn update_player(&mut self, player: &Player) -> Result<(), LadderError> {
        let stored = self.player_mut(player.id)?;
        *stored = Player {
            band: stored.band,
            position: stored.position,
            ..player.clone()
        };
        Ok(())
    }

    fn update_player_position(
        &mut self,
        id: PlayerId,
        band: Band,
        position: u32,
    ) -> Result<(), LadderError> {
        let stored = self.player_mut(id)?;
        stored.band = band;
        stored.position = position;
        Ok(())
    }

    fn shift_positions(
        &mut self,
        band: Band,
        start: u32,
        end: Option<u32>,
        delta: i32,
    ) -> Result<usize, LadderError> {
        let in_range = |p: &Player| p.band == band && p.position >= start && end.map_or(true, |e| p.position <= e);

        // Validate every new position before touching any row.
        let mut shifted = Vec::new();
        for p in self.players.values().filter(|p| in_range(p)) {
            let moved = i64::from(p.position) + i64::from(delta);
            let moved = u32::try_from(moved).ok().filter(|&m| m >= 1).ok_or_else(|| {
                LadderError::Store(format!(
                    "shifting band {band} position {} by {delta} leaves the ladder",
                    p.position
                ))
            })?;
            shifted.push((p.id, moved));
        }
        for (id, position) in &shifted {
            self.player_mut(*id)?.position = *position;
        }
        Ok(shifted.len())
    }

    fn remove_player(&mut self, id: PlayerId) -> Result<Option<Player>, LadderError> {
        Ok(self.players.remove(&id))
    }

    fn clear_players(&mut self) -> Result<usize, LadderError> {
        let removed = self.players.len();
        self.players.clear();
        Ok(removed)
    }

    fn insert_match(&mut self, game: TennisMatch) -> Result<(), LadderError> {
        self.matches.push(game);
        Ok(())
    }

    fn list_matches(&self) -> Result<Vec<TennisMatch>, LadderError> {
        let mut matches = self.matches.clone();
        // Same match date: most recently recorded first.
        matches.reverse();
        matches.sort_by(|a, b| b.match_date.cmp(&a.match_date));
        Ok(matches)
    }

    fn clear_matches(&mut self) -> Result<usize, LadderError> {
        let removed = self.matches.len();
        self.matches.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPlayer;
    use chrono::NaiveDate;

    fn player(last_name: &str, band: u8, position: u32) -> Player {
        Player::new(
            NewPlayer {
                first_name: "Test".to_string(),
                last_name: last_name.to_string(),
                nationality: "Italia".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                points: 0,
                band: None,
            },
            Band::new(band).unwrap(),
            position,
        )
    }

    #[test]
    fn shift_positions_respects_range() {
        let players = vec![
            player("A", 1, 1),
            player("B", 1, 2),
            player("C", 1, 3),
            player("D", 2, 2),
        ];
        let mut store = MemoryStore::with_players(players);
        let shifted = store.shift_positions(Band::BEST, 2, Some(3), 1).unwrap();
        assert_eq!(shifted, 2);
        let positions: Vec<_> = store
            .list_players_by_band(Band::BEST)
            .unwrap()
            .iter()
            .map(|p| (p.last_name.clone(), p.position))
            .collect();
        assert_eq!(
            positions,
            vec![("A".to_string(), 1), ("B".to_string(), 3), ("C".to_string(), 4)]
        );
        // Other bands untouched.
        assert_eq!(store.list_players_by_band(Band::new(2).unwrap()).unwrap()[0].position, 2);
    }

    #[test]
    fn shift_below_one_is_refused_without_partial_writes() {
        let mut store = MemoryStore::with_players(vec![player("A", 1, 1), player("B", 1, 2)]);
        let err = store.shift_positions(Band::BEST, 1, None, -1).unwrap_err();
        assert!(matches!(err, LadderError::Store(_)));
        let positions: Vec<_> = store
            .list_players_by_band(Band::BEST)
            .unwrap()
            .iter()
            .map(|p| p.position)
            .collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn players_are_listed_in_ladder_order() {
        let store = MemoryStore::with_players(vec![
            player("D", 2, 1),
            player("B", 1, 2),
            player("C", 1, 2),
            player("A", 1, 1),
        ]);
        let order: Vec<_> = store
            .list_players()
            .unwrap()
            .iter()
            .map(|p| p.last_name.clone())
            .collect();
        assert_eq!(order, ["A", "B", "C", "D"]);
    }

    #[test]
    fn update_player_keeps_ladder_slot() {
        let p = player("A", 3, 2);
        let id = p.id;
        let mut store = MemoryStore::with_players(vec![p.clone()]);
        let edited = Player {
            points: 500,
            band: Band::BEST,
            position: 9,
            ..p
        };
        store.update_player(&edited).unwrap();
        let stored = store.get_player(id).unwrap().unwrap();
        assert_eq!(stored.points, 500);
        assert_eq!(stored.band.number(), 3);
        assert_eq!(stored.position, 2);
    }
}
