use rand::Rng;

use crate::elo::expected_score;

/// A single sampled match result: set score, league points and the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub home_sets: i32,
    pub away_sets: i32,
    pub home_points: i32,
    pub away_points: i32,
    pub home_win: bool,
}

/// Draws one stochastic match result from a rating pair.
///
/// Consumes exactly two uniform draws: one for the winner, one for the set
/// margin. The margin is skewed by the winner's own pre-match win probability
/// (its "dominance"): heavy favorites mostly sweep, narrow favorites always
/// get dragged to five sets.
pub fn simulate_match<R: Rng + ?Sized>(
    home_rating: f64,
    away_rating: f64,
    rng: &mut R,
) -> MatchOutcome {
    let expected_home = expected_score(home_rating, away_rating);
    let home_win = rng.gen_range(0.0..1.0) < expected_home;

    let dominance = if home_win {
        expected_home
    } else {
        1.0 - expected_home
    };
    let r2 = rng.gen_range(0.0..1.0);
    let loser_sets = if dominance > 0.8 {
        if r2 < 0.7 { 0 } else { 1 }
    } else if dominance > 0.6 {
        if r2 < 0.5 { 1 } else { 2 }
    } else {
        2
    };

    // 3-0 and 3-1 pay out 3 points; a five-setter splits 2-1.
    let (winner_points, loser_points) = if loser_sets <= 1 { (3, 0) } else { (2, 1) };

    if home_win {
        MatchOutcome {
            home_sets: 3,
            away_sets: loser_sets,
            home_points: winner_points,
            away_points: loser_points,
            home_win,
        }
    } else {
        MatchOutcome {
            home_sets: loser_sets,
            away_sets: 3,
            home_points: loser_points,
            away_points: winner_points,
            home_win,
        }
    }
}
