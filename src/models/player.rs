//! Player, registration payload and profile edits.

use crate::models::band::Band;
use crate::models::error::LadderError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// A registered club member and their place on the ladder.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub birth_date: NaiveDate,
    /// Cumulative points. Drives the leaderboard, never the band placement.
    pub points: u32,
    /// Global rank snapshot taken before the last points change (for the trend arrow).
    pub previous_rank: Option<u32>,
    pub band: Band,
    /// Dense 1-based position inside `band`; 1 is the top of the band.
    pub position: u32,
}

impl Player {
    /// Create a player from a registration payload at the given ladder slot.
    pub fn new(new: NewPlayer, band: Band, position: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: new.first_name.trim().to_string(),
            last_name: new.last_name.trim().to_string(),
            nationality: new.nationality.trim().to_string(),
            birth_date: new.birth_date,
            points: new.points,
            previous_rank: None,
            band,
            position,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration form: band defaults to the configured entry band when omitted.
#[derive(Clone, Debug, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub band: Option<Band>,
}

impl NewPlayer {
    /// Names are required; everything else is free-form.
    pub fn validate(&self) -> Result<(), LadderError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(LadderError::InvalidPlayer(
                "first and last name are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Profile edit. Band and position only change through the reordering engine.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub points: Option<u32>,
}

impl ProfileUpdate {
    /// Apply the set fields to `player`. Empty names are rejected before anything changes.
    pub fn apply_to(self, player: &mut Player) -> Result<(), LadderError> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.first_name) || blank(&self.last_name) {
            return Err(LadderError::InvalidPlayer("names cannot be empty".to_string()));
        }
        if let Some(first_name) = self.first_name {
            player.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = self.last_name {
            player.last_name = last_name.trim().to_string();
        }
        if let Some(nationality) = self.nationality {
            player.nationality = nationality.trim().to_string();
        }
        if let Some(birth_date) = self.birth_date {
            player.birth_date = birth_date;
        }
        if let Some(points) = self.points {
            player.points = points;
        }
        Ok(())
    }
}
