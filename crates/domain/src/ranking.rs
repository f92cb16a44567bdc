// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cmp::Ordering;

use crate::types::UserId;

/// A user's score as seen by the ranking function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub user_id: UserId,
    pub points: u64,
}

impl ScoreEntry {
    #[must_use]
    pub const fn new(user_id: UserId, points: u64) -> Self {
        Self { user_id, points }
    }
}

/// A score with its leaderboard position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub user_id: UserId,
    pub points: u64,
    /// 1-based competition rank: one plus the number of users with strictly
    /// more points.
    pub position: usize,
    /// Whether at least one other user has exactly the same points.
    pub is_tied: bool,
}

fn leaderboard_order(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Ranks users by points, highest first.
///
/// Tied users share a position and the next distinct score skips by the
/// size of the tie group, so `[100, 100, 90]` ranks as `[1, 1, 3]`. Within a
/// tie group entries are ordered by user id ascending, which makes the
/// output independent of input order.
#[must_use]
pub fn rank(entries: Vec<ScoreEntry>) -> Vec<RankedEntry> {
    let mut sorted: Vec<ScoreEntry> = entries;
    sorted.sort_by(leaderboard_order);

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(sorted.len());
    let mut group_start: usize = 0;
    while group_start < sorted.len() {
        let points: u64 = sorted[group_start].points;
        let group_end: usize = sorted[group_start..]
            .iter()
            .position(|entry| entry.points != points)
            .map_or(sorted.len(), |offset| group_start + offset);
        let is_tied: bool = group_end - group_start > 1;

        for entry in &sorted[group_start..group_end] {
            ranked.push(RankedEntry {
                user_id: entry.user_id.clone(),
                points: entry.points,
                position: group_start + 1,
                is_tied,
            });
        }
        group_start = group_end;
    }

    ranked
}
