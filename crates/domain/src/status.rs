// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Reputation tier derived from a user's points.
///
/// Variants are declared lowest to highest so that the derived `Ord`
/// matches the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    /// 0 points and up.
    Amateur,
    /// 50 points and up.
    RegionalPoster,
    /// 100 points and up.
    Competitor,
    /// 500 points and up.
    RankedPoster,
    /// 1000 points and up.
    Contender,
    /// 5000 points and up.
    Champion,
    /// 10000 points and up.
    HallOfFamer,
}

/// The ladder, highest threshold first.
const LADDER: [Status; 7] = [
    Status::HallOfFamer,
    Status::Champion,
    Status::Contender,
    Status::RankedPoster,
    Status::Competitor,
    Status::RegionalPoster,
    Status::Amateur,
];

impl Status {
    /// Returns the display label, e.g. `HALL OF FAMER`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Amateur => "AMATEUR",
            Self::RegionalPoster => "REGIONAL POSTER",
            Self::Competitor => "COMPETITOR",
            Self::RankedPoster => "RANKED POSTER",
            Self::Contender => "CONTENDER",
            Self::Champion => "CHAMPION",
            Self::HallOfFamer => "HALL OF FAMER",
        }
    }

    /// Minimum points required to hold this status.
    #[must_use]
    pub const fn min_points(&self) -> u64 {
        match self {
            Self::Amateur => 0,
            Self::RegionalPoster => 50,
            Self::Competitor => 100,
            Self::RankedPoster => 500,
            Self::Contender => 1000,
            Self::Champion => 5000,
            Self::HallOfFamer => 10000,
        }
    }

    /// All statuses, highest threshold first.
    #[must_use]
    pub const fn ladder() -> &'static [Self] {
        &LADDER
    }

    /// The next status up the ladder, or `None` at the top.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Amateur => Some(Self::RegionalPoster),
            Self::RegionalPoster => Some(Self::Competitor),
            Self::Competitor => Some(Self::RankedPoster),
            Self::RankedPoster => Some(Self::Contender),
            Self::Contender => Some(Self::Champion),
            Self::Champion => Some(Self::HallOfFamer),
            Self::HallOfFamer => None,
        }
    }

    /// Points still needed to reach the next status from `points`.
    ///
    /// Returns `None` when `points` already sits at the top of the ladder.
    #[must_use]
    pub fn points_to_next(points: u64) -> Option<u64> {
        derive_status(points)
            .next()
            .map(|next| next.min_points().saturating_sub(points))
    }
}

/// Selects the highest status whose threshold is at or below `points`.
///
/// Total over `u64`; every value maps to exactly one status.
#[must_use]
pub fn derive_status(points: u64) -> Status {
    LADDER
        .iter()
        .copied()
        .find(|status| points >= status.min_points())
        .unwrap_or(Status::Amateur)
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LADDER
            .iter()
            .copied()
            .find(|status| status.label() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
