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
    clippy::all
)]

use cageside_domain::{Reputation, ReputationCounters, Status, UserId};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Actor type recorded for forum users.
pub const ACTOR_TYPE_USER: &str = "user";

/// Actor type recorded for internal processes such as the identity sync.
pub const ACTOR_TYPE_SYSTEM: &str = "system";

/// Represents the entity performing an action.
///
/// For reputation events this is the forum user whose activity caused the
/// change (the liker, the replier, the admin who pinned), not the user whose
/// reputation moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// An actor that is a forum user.
    #[must_use]
    pub fn user(user_id: &UserId) -> Self {
        Self::new(user_id.as_str().to_string(), String::from(ACTOR_TYPE_USER))
    }

    /// An actor that is an internal process.
    #[must_use]
    pub fn system(name: &str) -> Self {
        Self::new(name.to_string(), String::from(ACTOR_TYPE_SYSTEM))
    }
}

/// Represents the reason or trigger for an action.
///
/// Typically the id of the forum content (post, like, pin) that produced
/// the event, so a retraction can be correlated with its original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., post id, request id).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`RegisterUser`", "`LIKE_RECEIVED`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The reputation values of one user at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub points: u64,
    pub status: Status,
    pub counters: ReputationCounters,
}

impl CounterSnapshot {
    /// Captures the current values of a reputation record.
    #[must_use]
    pub const fn of(reputation: &Reputation) -> Self {
        Self {
            points: reputation.points(),
            status: reputation.status(),
            counters: *reputation.counters(),
        }
    }
}

/// An immutable audit event representing one accepted reputation change.
///
/// Every successful state change produces exactly one audit event, written
/// in the same transaction as the counters it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Storage-assigned id. `None` until the event has been persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The values before the transition. `None` for a registration.
    pub before: Option<CounterSnapshot>,
    /// The values after the transition.
    pub after: CounterSnapshot,
    /// The user whose reputation changed.
    pub user_id: UserId,
}

impl AuditEvent {
    /// Creates a new, not yet persisted `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: Option<CounterSnapshot>,
        after: CounterSnapshot,
        user_id: UserId,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            user_id,
        }
    }

    /// Creates an `AuditEvent` read back from storage.
    #[must_use]
    pub const fn with_id(
        event_id: i64,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: Option<CounterSnapshot>,
        after: CounterSnapshot,
        user_id: UserId,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            actor,
            cause,
            action,
            before,
            after,
            user_id,
        }
    }

    /// Points gained (positive) or lost (negative) in this change.
    #[must_use]
    pub fn points_change(&self) -> i128 {
        let before: u64 = self.before.map_or(0, |snapshot| snapshot.points);
        i128::from(self.after.points) - i128::from(before)
    }
}
