// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod counters;
mod error;
mod event;
mod leaderboard;
mod ranking;
mod reputation;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use counters::{Counter, ReputationCounters};
pub use error::DomainError;
pub use event::{DEFAULT_WEIGHT, Delta, EventKind, MAX_WEIGHT, PointWeights};
pub use leaderboard::{
    DEFAULT_PAGE_SIZE, LeaderboardPage, MAX_PAGE_SIZE, PageRequest, UserStanding, paginate,
    standing_for,
};
pub use ranking::{RankedEntry, ScoreEntry, rank};
pub use reputation::Reputation;
pub use status::{Status, derive_status};

// Re-export public types
pub use types::{MAX_USER_ID_LEN, MAX_USERNAME_LEN, UserId, UserRole, Username};
pub use validation::{require_user, validate_user_absent, validate_username_unchanged};
