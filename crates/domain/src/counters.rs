// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::event::Delta;

/// Identifies one of the per-user activity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Counter {
    /// Threads and replies authored by the user.
    Posts,
    /// Likes received on the user's content.
    Likes,
    /// Post of the Day awards.
    Potd,
    /// Legacy per-user pins.
    PinnedByUser,
    /// Global pins placed by an administrator.
    Pinned,
    /// Replies received on the user's threads.
    Replies,
}

impl Counter {
    /// Returns the snake-case column name used for storage and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts_count",
            Self::Likes => "likes_count",
            Self::Potd => "potd_count",
            Self::PinnedByUser => "pinned_by_user_count",
            Self::Pinned => "pinned_count",
            Self::Replies => "replies_count",
        }
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The activity counters kept for every user.
///
/// All counters start at zero and never go below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReputationCounters {
    pub posts_count: u64,
    pub likes_count: u64,
    pub potd_count: u64,
    pub pinned_by_user_count: u64,
    pub pinned_count: u64,
    pub replies_count: u64,
}

impl ReputationCounters {
    /// Returns the current value of a counter.
    #[must_use]
    pub const fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Posts => self.posts_count,
            Counter::Likes => self.likes_count,
            Counter::Potd => self.potd_count,
            Counter::PinnedByUser => self.pinned_by_user_count,
            Counter::Pinned => self.pinned_count,
            Counter::Replies => self.replies_count,
        }
    }

    const fn slot(&mut self, counter: Counter) -> &mut u64 {
        match counter {
            Counter::Posts => &mut self.posts_count,
            Counter::Likes => &mut self.likes_count,
            Counter::Potd => &mut self.potd_count,
            Counter::PinnedByUser => &mut self.pinned_by_user_count,
            Counter::Pinned => &mut self.pinned_count,
            Counter::Replies => &mut self.replies_count,
        }
    }

    /// Returns a copy with `counter` moved by one step in the direction of
    /// `delta`. A decrement at zero leaves the counter at zero.
    #[must_use]
    pub fn with_delta(mut self, counter: Counter, delta: Delta) -> Self {
        let slot: &mut u64 = self.slot(counter);
        *slot = delta.apply_to(*slot, 1);
        self
    }
}
