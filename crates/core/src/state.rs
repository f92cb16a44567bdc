// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cageside_audit::AuditEvent;
use cageside_domain::{RankedEntry, Reputation, Status, UserId, UserRole, Username};

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The record before the transition. `None` for a registration.
    pub before: Option<Reputation>,
    /// The record after the transition.
    pub after: Reputation,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

impl TransitionResult {
    /// Whether this transition created the record.
    #[must_use]
    pub const fn is_registration(&self) -> bool {
        self.before.is_none()
    }
}

/// Outcome of an identity sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The user's record after the sync.
    pub reputation: Reputation,
    /// Whether the sync created the record.
    pub created: bool,
}

/// One row of the leaderboard, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub is_tied: bool,
    pub user_id: UserId,
    pub username: Username,
    pub role: UserRole,
    pub points: u64,
    pub status: Status,
}

impl LeaderboardEntry {
    /// Joins a ranked position with the user's record.
    #[must_use]
    pub fn new(ranked: &RankedEntry, reputation: &Reputation) -> Self {
        Self {
            position: ranked.position,
            is_tied: ranked.is_tied,
            user_id: ranked.user_id.clone(),
            username: reputation.username().clone(),
            role: reputation.role(),
            points: reputation.points(),
            status: reputation.status(),
        }
    }
}
