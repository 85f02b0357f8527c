use super::growth;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The ordered sequence of samples recorded for one game, oldest first.
pub type History = Vec<Sample>;

/// One observation of a game's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub visits: u64,
    pub playing: u64,
    pub visits_growth: f64,
    pub playing_growth: f64,
}

impl Sample {
    /// Build the sample that follows `previous` in a game's history.
    ///
    /// Growth is computed against `previous`; the first sample of a history has no
    /// predecessor and therefore zero growth.
    #[must_use]
    pub fn next(previous: Option<&Self>, timestamp: DateTime<Utc>, visits: u64, playing: u64) -> Self {
        Self {
            timestamp,
            visits,
            playing,
            visits_growth: growth(visits, previous.map(|p| p.visits)),
            playing_growth: growth(playing, previous.map(|p| p.playing)),
        }
    }

    /// The growth-only view of this sample.
    #[must_use]
    pub const fn growth_point(&self) -> GrowthPoint {
        GrowthPoint {
            timestamp: self.timestamp,
            visits_growth: self.visits_growth,
            playing_growth: self.playing_growth,
        }
    }
}

/// A sample reduced to its timestamp and growth figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub timestamp: DateTime<Utc>,
    pub visits_growth: f64,
    pub playing_growth: f64,
}
