//! Ladder configuration: points per win, match re-ranking policy, entry band, band settings.
//! Built from defaults, overridable from env: POINTS_PER_WIN, MATCH_POLICY, ENTRY_BAND.

use crate::models::{Band, BandSettings, LadderError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What recording a match does to band positions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Winner gets points; positions stay as they are.
    #[default]
    PointsOnly,
    /// Winner gets points and the band challenge rules move winner/loser.
    BandChallenge,
}

impl FromStr for MatchPolicy {
    type Err = LadderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points_only" => Ok(MatchPolicy::PointsOnly),
            "band_challenge" => Ok(MatchPolicy::BandChallenge),
            other => Err(LadderError::InvalidTarget(format!(
                "unknown match policy {other:?} (expected points_only or band_challenge)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LadderConfig {
    /// Fixed points credited to the winner of every match.
    pub points_per_win: u32,
    pub match_policy: MatchPolicy,
    /// Band new players join when registration does not name one.
    pub entry_band: Band,
    pub bands: BandSettings,
}

fn default_points_per_win() -> u32 {
    250
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            points_per_win: default_points_per_win(),
            match_policy: MatchPolicy::default(),
            entry_band: Band::WORST,
            bands: BandSettings::default(),
        }
    }
}

impl LadderConfig {
    /// Defaults overridden by environment variables. Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup("POINTS_PER_WIN") {
            match raw.trim().parse() {
                Ok(points) => config.points_per_win = points,
                Err(_) => log::warn!("Ignoring POINTS_PER_WIN={raw:?}: not a number"),
            }
        }
        if let Some(raw) = lookup("MATCH_POLICY") {
            match raw.parse() {
                Ok(policy) => config.match_policy = policy,
                Err(e) => log::warn!("Ignoring MATCH_POLICY: {e}"),
            }
        }
        if let Some(raw) = lookup("ENTRY_BAND") {
            match raw.trim().parse::<u8>().map_err(|e| e.to_string()).and_then(|n| {
                Band::new(n).map_err(|e| e.to_string())
            }) {
                Ok(band) => config.entry_band = band,
                Err(e) => log::warn!("Ignoring ENTRY_BAND={raw:?}: {e}"),
            }
        }
        config
    }
}
