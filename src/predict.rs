use std::collections::HashMap;

use crate::elo;
use crate::model::Match;

/// Joins home and away names into the response key for one fixture.
pub const MATCH_KEY_SEPARATOR: &str = "|||";

/// Maps each upcoming fixture to its single most likely scoreline. No
/// randomness: the rating gap alone picks a fixed probability band.
pub fn predict_scorelines(
    ratings: &HashMap<String, f64>,
    upcoming: &[Match],
) -> HashMap<String, String> {
    let mut predictions = HashMap::with_capacity(upcoming.len());
    for m in upcoming {
        let home = elo::rating_of(ratings, &m.home_team);
        let away = elo::rating_of(ratings, &m.away_team);
        let expected_home = elo::expected_score(home, away);

        let key = format!("{}{}{}", m.home_team, MATCH_KEY_SEPARATOR, m.away_team);
        predictions.insert(key, scoreline_for(expected_home).to_string());
    }
    predictions
}

// Band cutoffs are checked in this exact precedence; the final branch covers
// the 0.45..=0.55 toss-up range.
fn scoreline_for(expected_home: f64) -> &'static str {
    if expected_home > 0.85 {
        "3-0"
    } else if expected_home > 0.70 {
        "3-1"
    } else if expected_home > 0.55 {
        "3-2"
    } else if expected_home < 0.15 {
        "0-3"
    } else if expected_home < 0.30 {
        "1-3"
    } else if expected_home < 0.45 {
        "2-3"
    } else if expected_home >= 0.5 {
        "3-2"
    } else {
        "2-3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_spot_checks() {
        assert_eq!(scoreline_for(0.90), "3-0");
        assert_eq!(scoreline_for(0.75), "3-1");
        assert_eq!(scoreline_for(0.60), "3-2");
        assert_eq!(scoreline_for(0.50), "3-2");
        assert_eq!(scoreline_for(0.46), "2-3");
        assert_eq!(scoreline_for(0.35), "2-3");
        assert_eq!(scoreline_for(0.20), "1-3");
        assert_eq!(scoreline_for(0.10), "0-3");
    }

    #[test]
    fn toss_up_range_splits_at_half() {
        assert_eq!(scoreline_for(0.55), "3-2");
        assert_eq!(scoreline_for(0.50), "3-2");
        assert_eq!(scoreline_for(0.49), "2-3");
        assert_eq!(scoreline_for(0.45), "2-3");
    }

    #[test]
    fn fixtures_are_keyed_by_joined_names() {
        let ratings = HashMap::from([("Home".to_string(), 1200.0)]);
        let upcoming = vec![Match {
            home_team: "Home".to_string(),
            away_team: "Away".to_string(),
            result_score: String::new(),
            is_played: false,
            match_date: "2025-04-01".to_string(),
        }];
        let predictions = predict_scorelines(&ratings, &upcoming);
        // Both sides at 1200 (Away defaulted): dead-even toss-up.
        assert_eq!(predictions["Home|||Away"], "3-2");
    }

    #[test]
    fn rating_gaps_pick_the_expected_band() {
        let ratings = HashMap::from([
            ("Giant".to_string(), 1600.0),
            ("Minnow".to_string(), 1200.0),
            ("Solid".to_string(), 1441.0),
            ("Even".to_string(), 1200.0),
        ]);
        let fixture = |home: &str, away: &str| Match {
            home_team: home.to_string(),
            away_team: away.to_string(),
            result_score: String::new(),
            is_played: false,
            match_date: "2025-04-01".to_string(),
        };

        // 1600 vs 1200: expected ~0.909.
        let p = predict_scorelines(&ratings, &[fixture("Giant", "Minnow")]);
        assert_eq!(p["Giant|||Minnow"], "3-0");

        // 1200 vs 1441: expected ~0.20 for the home side.
        let p = predict_scorelines(&ratings, &[fixture("Even", "Solid")]);
        assert_eq!(p["Even|||Solid"], "1-3");
    }
}
