// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::counters::ReputationCounters;
use crate::event::{Delta, EventKind, PointWeights};
use crate::status::{Status, derive_status};
use crate::types::{UserId, UserRole, Username};

/// A user's reputation record.
///
/// `status` is never set directly. Every constructor derives it from
/// `points`, so a `Reputation` can never hold a stale status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reputation {
    user_id: UserId,
    username: Username,
    role: UserRole,
    points: u64,
    counters: ReputationCounters,
    status: Status,
}

impl Reputation {
    /// Creates the zeroed record for a newly registered user.
    #[must_use]
    pub fn new(user_id: UserId, username: Username, role: UserRole) -> Self {
        Self {
            user_id,
            username,
            role,
            points: 0,
            counters: ReputationCounters::default(),
            status: derive_status(0),
        }
    }

    /// Rebuilds a record from stored values, re-deriving the status.
    #[must_use]
    pub fn from_stored(
        user_id: UserId,
        username: Username,
        role: UserRole,
        points: u64,
        counters: ReputationCounters,
    ) -> Self {
        Self {
            user_id,
            username,
            role,
            points,
            counters,
            status: derive_status(points),
        }
    }

    /// Returns the record after one event of `kind` has been applied in the
    /// direction of `delta`.
    ///
    /// The counter moves by one and the points move by the kind's weight.
    /// Both floor at zero independently.
    #[must_use]
    pub fn with_event(&self, kind: EventKind, delta: Delta, weights: &PointWeights) -> Self {
        let points: u64 = delta.apply_to(self.points, weights.weight(kind));
        Self {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            role: self.role,
            points,
            counters: self.counters.with_delta(kind.counter(), delta),
            status: derive_status(points),
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub const fn counters(&self) -> &ReputationCounters {
        &self.counters
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }
}
