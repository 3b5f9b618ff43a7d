//! Data structures for the tennis ladder: players, bands, matches, errors.

mod band;
mod error;
mod game;
mod player;

pub use band::{Band, BandSetting, BandSettingUpdate, BandSettings, Direction};
pub use error::LadderError;
pub use game::{MatchId, NewMatch, TennisMatch};
pub use player::{NewPlayer, Player, PlayerId, ProfileUpdate};
