// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cageside_audit::{Action, Actor, AuditEvent, Cause, CounterSnapshot};
use cageside_domain::{Reputation, ReputationCounters, Status, UserId, UserRole, Username};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::diesel_schema::{reputation_events, users};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// A row of the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: String,
    pub username: String,
    pub role: String,
    pub points: i64,
    pub posts_count: i64,
    pub likes_count: i64,
    pub potd_count: i64,
    pub pinned_by_user_count: i64,
    pub pinned_count: i64,
    pub replies_count: i64,
    pub status: String,
    #[allow(dead_code)]
    pub registered_at: String,
}

fn stored_count(column: &str, value: i64) -> Result<u64, PersistenceError> {
    value.to_u64().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} is negative: {value}"))
    })
}

impl UserRow {
    /// Rebuilds the domain record.
    ///
    /// Status is always re-derived from points. A stored status that
    /// disagrees is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored value fails domain validation.
    pub fn into_reputation(self) -> Result<Reputation, PersistenceError> {
        let user_id: UserId = UserId::new(&self.user_id)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let username: Username = Username::new(&self.username)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let role: UserRole = self
            .role
            .parse()
            .map_err(|e: cageside_domain::DomainError| {
                PersistenceError::ReconstructionError(e.to_string())
            })?;
        let counters: ReputationCounters = ReputationCounters {
            posts_count: stored_count("posts_count", self.posts_count)?,
            likes_count: stored_count("likes_count", self.likes_count)?,
            potd_count: stored_count("potd_count", self.potd_count)?,
            pinned_by_user_count: stored_count("pinned_by_user_count", self.pinned_by_user_count)?,
            pinned_count: stored_count("pinned_count", self.pinned_count)?,
            replies_count: stored_count("replies_count", self.replies_count)?,
        };
        let points: u64 = stored_count("points", self.points)?;

        let reputation: Reputation =
            Reputation::from_stored(user_id, username, role, points, counters);
        match self.status.parse::<Status>() {
            Ok(stored) if stored == reputation.status() => {}
            Ok(stored) => warn!(
                user_id = %reputation.user_id(),
                stored = %stored,
                derived = %reputation.status(),
                "Stored status disagrees with points, using derived status"
            ),
            Err(e) => warn!(
                user_id = %reputation.user_id(),
                derived = %reputation.status(),
                "{e}, using derived status"
            ),
        }
        Ok(reputation)
    }
}

/// A row of the `reputation_events` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reputation_events)]
pub struct ReputationEventRow {
    pub event_id: i64,
    pub user_id: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: Option<String>,
    pub after_snapshot_json: String,
    #[allow(dead_code)]
    pub created_at: String,
}

impl ReputationEventRow {
    /// Rebuilds the audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON column cannot be parsed or the user id is
    /// invalid.
    pub fn into_audit_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before: Option<CounterSnapshot> = self
            .before_snapshot_json
            .as_deref()
            .map(serde_json::from_str::<CounterSnapshot>)
            .transpose()?;
        let after: CounterSnapshot = serde_json::from_str(&self.after_snapshot_json)?;
        let user_id: UserId = UserId::new(&self.user_id)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(AuditEvent::with_id(
            self.event_id,
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            before,
            after,
            user_id,
        ))
    }
}
