use std::collections::HashMap;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::elo;
use crate::match_sim::simulate_match;
use crate::model::{Match, TeamStats};
use crate::standings::rank_key;

pub const DEFAULT_TRIALS: usize = 1000;

// splitmix64 increment, used to spread per-trial seeds.
const SEED_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Number of independent season completions to run.
    pub trials: usize,
    /// Base seed; each trial derives its own ChaCha8 stream from it, so the
    /// result is reproducible regardless of how trials are scheduled.
    pub seed: u64,
    /// Trials that would start after this instant are dropped, leaving fewer
    /// observations rather than running unbounded.
    pub deadline: Option<Instant>,
}

impl SimConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed,
            deadline: None,
        }
    }
}

// Fixed-size standing counters, one slot per team. Cloned per trial instead
// of rebuilding name-keyed maps.
#[derive(Debug, Clone, Copy)]
struct TeamRecord {
    points: i32,
    wins: i32,
    played: i32,
    sets_won: i32,
    sets_lost: i32,
}

// Fixture with names and ratings resolved up front. A side with no slot in
// the standings stays `None` and is skipped when applying outcomes.
struct Fixture {
    home: Option<usize>,
    away: Option<usize>,
    home_rating: f64,
    away_rating: f64,
}

/// Runs `cfg.trials` independent completions of the remaining schedule and
/// returns the target team's 1-based final rank per trial.
///
/// Fixtures are replayed in their given order, not date order. Trials run in
/// parallel; each one only reads the shared baseline and writes its own
/// cloned records. A target team absent from `teams` records no observations,
/// so the result may be shorter than `cfg.trials`.
pub fn simulate_season(
    teams: &[TeamStats],
    ratings: &HashMap<String, f64>,
    unplayed: &[Match],
    target_team: &str,
    cfg: SimConfig,
) -> Vec<usize> {
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();
    let Some(&target) = index.get(target_team) else {
        // No trial could ever observe this team.
        return Vec::new();
    };

    let baseline: Vec<TeamRecord> = teams
        .iter()
        .map(|t| TeamRecord {
            points: t.points,
            wins: t.wins,
            played: t.played,
            sets_won: t.sets_won,
            sets_lost: t.sets_lost,
        })
        .collect();

    let fixtures: Vec<Fixture> = unplayed
        .iter()
        .map(|m| Fixture {
            home: index.get(m.home_team.as_str()).copied(),
            away: index.get(m.away_team.as_str()).copied(),
            home_rating: elo::rating_of(ratings, &m.home_team),
            away_rating: elo::rating_of(ratings, &m.away_team),
        })
        .collect();

    (0..cfg.trials)
        .into_par_iter()
        .filter_map(|trial| {
            if cfg.deadline.is_some_and(|d| Instant::now() >= d) {
                return None;
            }
            let mut rng =
                ChaCha8Rng::seed_from_u64(cfg.seed ^ (trial as u64).wrapping_mul(SEED_GAMMA));
            run_trial(&baseline, &fixtures, target, &mut rng)
        })
        .collect()
}

fn run_trial(
    baseline: &[TeamRecord],
    fixtures: &[Fixture],
    target: usize,
    rng: &mut ChaCha8Rng,
) -> Option<usize> {
    let mut records = baseline.to_vec();

    for f in fixtures {
        let outcome = simulate_match(f.home_rating, f.away_rating, rng);
        if let Some(h) = f.home {
            let rec = &mut records[h];
            rec.played += 1;
            if outcome.home_win {
                rec.wins += 1;
            }
            rec.points += outcome.home_points;
            rec.sets_won += outcome.home_sets;
            rec.sets_lost += outcome.away_sets;
        }
        if let Some(a) = f.away {
            let rec = &mut records[a];
            rec.played += 1;
            if !outcome.home_win {
                rec.wins += 1;
            }
            rec.points += outcome.away_points;
            rec.sets_won += outcome.away_sets;
            rec.sets_lost += outcome.home_sets;
        }
    }

    // Stable sort on baseline order, same tie-break chain as the snapshot
    // comparator.
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&x, &y| {
        let rx = &records[x];
        let ry = &records[y];
        rank_key(ry.points, ry.wins, ry.sets_won - ry.sets_lost).cmp(&rank_key(
            rx.points,
            rx.wins,
            rx.sets_won - rx.sets_lost,
        ))
    });

    order.iter().position(|&i| i == target).map(|p| p + 1)
}
