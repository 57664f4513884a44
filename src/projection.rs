use serde::Serialize;
use tracing::debug;

use crate::elo::{self, EloConfig};
use crate::model::{Match, TeamStats};
use crate::season_sim::{self, SimConfig};

/// Playoff spots by final rank.
const PLAYOFF_CUTOFF: usize = 4;

/// Aggregated projection for the target team. Probabilities are percentages;
/// they are `None` only for the season-complete placeholder, in which case
/// the fields are left out of the JSON body entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub best_rank: usize,
    pub worst_rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub championship_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playoff_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relegation_probability: Option<f64>,
}

impl ProjectionSummary {
    /// Placeholder returned when there is nothing left to simulate. Not the
    /// team's actual current rank; a real final-standings lookup is a known
    /// gap.
    pub fn season_complete() -> Self {
        Self {
            best_rank: 1,
            worst_rank: 1,
            championship_probability: None,
            playoff_probability: None,
            relegation_probability: None,
        }
    }

    pub fn is_season_complete(&self) -> bool {
        self.championship_probability.is_none()
    }
}

/// Full projection pipeline: rate, simulate, aggregate.
///
/// With zero unplayed fixtures the request short-circuits to the
/// [`ProjectionSummary::season_complete`] placeholder without touching the
/// random source.
pub fn project(
    teams: &[TeamStats],
    fixture: &[Match],
    target_team: &str,
    cfg: SimConfig,
) -> ProjectionSummary {
    let unplayed: Vec<Match> = fixture.iter().filter(|m| !m.is_played).cloned().collect();
    if unplayed.is_empty() {
        return ProjectionSummary::season_complete();
    }

    let ratings = elo::compute_ratings(teams, fixture, EloConfig::default());
    let ranks = season_sim::simulate_season(teams, &ratings, &unplayed, target_team, cfg);
    debug!(
        observations = ranks.len(),
        trials = cfg.trials,
        unplayed = unplayed.len(),
        "season simulation finished"
    );
    summarize(&ranks, teams.len(), cfg.trials)
}

/// Reduces per-trial rank observations into the projection summary.
///
/// The configured trial count is the probability denominator even when fewer
/// observations were recorded: dropped trials lower the probabilities rather
/// than renormalizing them. An empty observation list yields zeros.
pub fn summarize(ranks: &[usize], team_count: usize, trials: usize) -> ProjectionSummary {
    let best_rank = ranks.iter().copied().min().unwrap_or(0);
    let worst_rank = ranks.iter().copied().max().unwrap_or(0);

    // Bottom two places count as relegation; leagues with fewer than two
    // teams are not special-cased.
    let relegation_floor = team_count.saturating_sub(1);

    let mut championship = 0usize;
    let mut playoff = 0usize;
    let mut relegation = 0usize;
    for &rank in ranks {
        if rank == 1 {
            championship += 1;
        }
        if rank <= PLAYOFF_CUTOFF {
            playoff += 1;
        }
        if rank >= relegation_floor {
            relegation += 1;
        }
    }

    let denominator = trials.max(1) as f64;
    let pct = |count: usize| count as f64 / denominator * 100.0;

    ProjectionSummary {
        best_rank,
        worst_rank,
        championship_probability: Some(pct(championship)),
        playoff_probability: Some(pct(playoff)),
        relegation_probability: Some(pct(relegation)),
    }
}
