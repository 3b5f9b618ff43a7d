//! Band (the four ladder tiers), per-band display settings, and quick-move Direction.

use crate::models::error::LadderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four tiers, 1 = best. Always in 1..=4.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Band(u8);

impl Band {
    pub const BEST: Band = Band(1);
    pub const WORST: Band = Band(4);
    pub const ALL: [Band; 4] = [Band(1), Band(2), Band(3), Band(4)];

    pub fn new(number: u8) -> Result<Self, LadderError> {
        if (Self::BEST.0..=Self::WORST.0).contains(&number) {
            Ok(Band(number))
        } else {
            Err(LadderError::InvalidTarget(format!(
                "band must be between 1 and 4 (got {number})"
            )))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Next band up the ladder (band number - 1), if any.
    pub fn better(self) -> Option<Band> {
        (self != Self::BEST).then(|| Band(self.0 - 1))
    }

    /// Next band down the ladder (band number + 1), if any.
    pub fn worse(self) -> Option<Band> {
        (self != Self::WORST).then(|| Band(self.0 + 1))
    }
}

impl TryFrom<u8> for Band {
    type Error = LadderError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Band::new(number)
    }
}

impl From<Band> for u8 {
    fn from(band: Band) -> u8 {
        band.0
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quick-move direction: `Up` is towards position 1 of band 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Display configuration for one band. `max_players` is a soft limit: exceeding it only logs a warning.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BandSetting {
    pub band: Band,
    pub name: String,
    /// CSS color, e.g. `#FFD700`.
    pub color: String,
    pub max_players: u32,
}

/// Partial update of a band's settings (fields left `None` are kept).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BandSettingUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub max_players: Option<u32>,
}

/// Settings for all four bands, indexed by band number. Only built through `Default`,
/// so there is always one entry per band.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BandSettings {
    bands: Vec<BandSetting>,
}

impl Default for BandSettings {
    fn default() -> Self {
        const COLORS: [&str; 4] = ["#FFD700", "#C0C0C0", "#CD7F32", "#6B7280"];
        let bands = Band::ALL
            .iter()
            .zip(COLORS)
            .map(|(&band, color)| BandSetting {
                band,
                name: format!("Fascia {band}"),
                color: color.to_string(),
                max_players: 16,
            })
            .collect();
        Self { bands }
    }
}

impl BandSettings {
    pub fn get(&self, band: Band) -> &BandSetting {
        &self.bands[usize::from(band.0 - 1)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BandSetting> {
        self.bands.iter()
    }

    /// Apply a partial update; an empty name is rejected.
    pub fn update(&mut self, band: Band, update: BandSettingUpdate) -> Result<&BandSetting, LadderError> {
        let setting = &mut self.bands[usize::from(band.0 - 1)];
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(LadderError::InvalidTarget("band name cannot be empty".to_string()));
            }
            setting.name = name.to_string();
        }
        if let Some(color) = update.color {
            setting.color = color;
        }
        if let Some(max_players) = update.max_players {
            setting.max_players = max_players;
        }
        Ok(setting)
    }
}
