use std::collections::HashMap;

use crate::model::{Match, TeamStats};

/// Neutral rating for any team with no entry in the rating map. Applied as an
/// explicit policy, not an error: unknown teams simply play at par.
pub const DEFAULT_RATING: f64 = 1200.0;

#[derive(Debug, Clone, Copy)]
pub struct EloConfig {
    pub k: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self { k: 32.0 }
    }
}

/// Computes a rating for every team from its played-match history.
///
/// Matches are replayed in `match_date` order (stable: equal dates keep their
/// input order), each one updating both sides in place so later matches see
/// the updated values. Unparsable scorelines are skipped silently; that is
/// the only non-happy path.
pub fn compute_ratings(
    teams: &[TeamStats],
    matches: &[Match],
    cfg: EloConfig,
) -> HashMap<String, f64> {
    let mut ratings: HashMap<String, f64> = teams
        .iter()
        .map(|t| (t.name.clone(), DEFAULT_RATING))
        .collect();

    let mut history: Vec<&Match> = matches
        .iter()
        .filter(|m| m.is_played && !m.result_score.is_empty())
        .collect();
    history.sort_by(|a, b| a.match_date.cmp(&b.match_date));

    for m in history {
        let Some((home_sets, away_sets)) = parse_score(&m.result_score) else {
            continue;
        };

        let home = rating_of(&ratings, &m.home_team);
        let away = rating_of(&ratings, &m.away_team);

        // Sets always resolve a winner; a malformed equal-sets score counts
        // as an away win and is preserved as-is.
        let actual_home = if home_sets > away_sets { 1.0 } else { 0.0 };
        let actual_away = 1.0 - actual_home;

        let expected_home = expected_score(home, away);
        let expected_away = expected_score(away, home);

        let multiplier = margin_multiplier(home_sets - away_sets);

        ratings.insert(
            m.home_team.clone(),
            home + cfg.k * multiplier * (actual_home - expected_home),
        );
        ratings.insert(
            m.away_team.clone(),
            away + cfg.k * multiplier * (actual_away - expected_away),
        );
    }

    ratings
}

pub fn rating_of(ratings: &HashMap<String, f64>, team: &str) -> f64 {
    ratings.get(team).copied().unwrap_or(DEFAULT_RATING)
}

/// Logistic win probability of the `rating` side against `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - rating) / 400.0))
}

// Sweeps move ratings harder than five-setters.
fn margin_multiplier(set_diff: i32) -> f64 {
    match set_diff.abs() {
        3 => 1.3,
        2 => 1.1,
        _ => 1.0,
    }
}

fn parse_score(raw: &str) -> Option<(i32, i32)> {
    let (h, a) = raw.split_once('-')?;
    Some((h.parse().ok()?, a.parse().ok()?))
}
