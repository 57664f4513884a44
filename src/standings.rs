use std::cmp::Ordering;

use crate::model::TeamStats;

/// League tie-break chain, in descending priority: points, wins, set
/// differential. No further key is defined; teams equal on all three keep
/// their incoming order, so callers must use stable sorts.
pub fn compare(a: &TeamStats, b: &TeamStats) -> Ordering {
    rank_key(b.points, b.wins, b.sets_won - b.sets_lost).cmp(&rank_key(
        a.points,
        a.wins,
        a.sets_won - a.sets_lost,
    ))
}

/// Sort key shared by the snapshot comparator and the per-trial arenas.
/// Larger keys rank higher.
pub fn rank_key(points: i32, wins: i32, set_diff: i32) -> (i32, i32, i32) {
    (points, wins, set_diff)
}
