//! A recorded singles match between two ladder players.

use crate::models::error::LadderError;
use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A played match. Immutable once recorded (only bulk delete removes it).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TennisMatch {
    pub id: MatchId,
    pub player1: PlayerId,
    pub player2: PlayerId,
    /// Always equal to `player1` or `player2`.
    pub winner: PlayerId,
    /// Free-form set scores from player 1's perspective, e.g. "6-4, 3-6, 7-5".
    pub score: String,
    pub match_date: NaiveDate,
    pub points_awarded: u32,
}

impl TennisMatch {
    pub fn new(new: NewMatch, points_awarded: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            player1: new.player1,
            player2: new.player2,
            winner: new.winner,
            score: new.score.trim().to_string(),
            match_date: new.match_date,
            points_awarded,
        }
    }

    pub fn loser(&self) -> PlayerId {
        if self.winner == self.player1 {
            self.player2
        } else {
            self.player1
        }
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1 == player || self.player2 == player
    }
}

/// Match registration form.
#[derive(Clone, Debug, Deserialize)]
pub struct NewMatch {
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub winner: PlayerId,
    pub score: String,
    pub match_date: NaiveDate,
}

impl NewMatch {
    /// Two distinct players, a winner among them, and a score.
    pub fn validate(&self) -> Result<(), LadderError> {
        if self.player1 == self.player2 {
            return Err(LadderError::InvalidMatch(
                "select two different players".to_string(),
            ));
        }
        if self.winner != self.player1 && self.winner != self.player2 {
            return Err(LadderError::InvalidMatch(
                "the winner must be one of the two players".to_string(),
            ));
        }
        if self.score.trim().is_empty() {
            return Err(LadderError::InvalidMatch("score is required".to_string()));
        }
        Ok(())
    }
}
