use serde::{Deserialize, Serialize};

/// A team's accumulated league standing at the time of the request.
///
/// Per-trial copies only ever increment the counters; the baseline snapshot
/// itself is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub name: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub played: i32,
    #[serde(default)]
    pub sets_won: i32,
    #[serde(default)]
    pub sets_lost: i32,
}

/// One fixture, played or not. Played matches feed the rating model;
/// unplayed ones are simulation candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub home_team: String,
    pub away_team: String,
    /// `"<homeSets>-<awaySets>"`, empty until the match is played.
    #[serde(default)]
    pub result_score: String,
    #[serde(default)]
    pub is_played: bool,
    /// Lexically sortable date string (ISO-style); compared as-is.
    #[serde(default)]
    pub match_date: String,
}
