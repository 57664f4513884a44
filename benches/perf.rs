use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use volleysim_api::elo::{EloConfig, compute_ratings};
use volleysim_api::model::{Match, TeamStats};
use volleysim_api::projection::project;
use volleysim_api::season_sim::SimConfig;

// Double round-robin league with the first half of the schedule played.
fn sample_league(size: usize) -> (Vec<TeamStats>, Vec<Match>) {
    let teams: Vec<TeamStats> = (0..size)
        .map(|i| TeamStats {
            name: format!("Team {i:02}"),
            points: (size - i) as i32,
            wins: ((size - i) / 2) as i32,
            played: (size - 1) as i32,
            sets_won: (3 * (size - i)) as i32,
            sets_lost: (2 * i) as i32,
        })
        .collect();

    let mut fixture = Vec::new();
    let mut round = 0;
    for home in 0..size {
        for away in 0..size {
            if home == away {
                continue;
            }
            let played = round % 2 == 0;
            fixture.push(Match {
                home_team: teams[home].name.clone(),
                away_team: teams[away].name.clone(),
                result_score: if played {
                    if (home + away) % 3 == 0 { "3-2" } else { "3-0" }.to_string()
                } else {
                    String::new()
                },
                is_played: played,
                match_date: format!("2025-01-{:02}", (round % 28) + 1),
            });
            round += 1;
        }
    }
    (teams, fixture)
}

fn bench_ratings(c: &mut Criterion) {
    let (teams, fixture) = sample_league(14);
    c.bench_function("elo_ratings_14_teams", |b| {
        b.iter(|| {
            black_box(compute_ratings(
                black_box(&teams),
                black_box(&fixture),
                EloConfig::default(),
            ))
        })
    });
}

fn bench_projection(c: &mut Criterion) {
    let (teams, fixture) = sample_league(14);
    c.bench_function("project_14_team_league_1000_trials", |b| {
        b.iter(|| {
            black_box(project(
                black_box(&teams),
                black_box(&fixture),
                "Team 05",
                SimConfig::seeded(7),
            ))
        })
    });
}

criterion_group!(benches, bench_ratings, bench_projection);
criterion_main!(benches);
