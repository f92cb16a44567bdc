// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These are distinct from domain types and represent the API contract.
//! Identifiers, kinds, deltas and roles arrive as raw values and are parsed
//! by the handlers before anything is mutated.

use cageside_audit::{AuditEvent, CounterSnapshot};
use cageside_domain::{ReputationCounters, Status};
use serde::{Deserialize, Serialize};

/// API request sent by the identity provider on every authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncUserRequest {
    /// The stable external user id.
    pub user_id: String,
    /// The username. Immutable once the user exists.
    pub username: String,
    /// The user's role, e.g. `MEMBER` or `FIGHTER`. New users default to `MEMBER`;
    /// when omitted on a later sync the stored role is kept.
    #[serde(default)]
    pub role: Option<String>,
}

/// API response for an identity sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncUserResponse {
    pub user_id: String,
    pub username: String,
    pub role: String,
    /// Whether this sync created the record.
    pub created: bool,
    /// A success message.
    pub message: String,
}

/// API request to apply one reputation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyEventRequest {
    /// The user whose action caused the event.
    pub actor_id: String,
    /// The user whose reputation changes.
    pub target_id: String,
    /// The event kind, e.g. `LIKE_RECEIVED`.
    pub kind: String,
    /// `1` to apply, `-1` to reverse.
    pub delta: i64,
    /// Correlation id, usually the thread or reply id.
    #[serde(default)]
    pub cause_id: Option<String>,
    #[serde(default)]
    pub cause_description: Option<String>,
}

/// The six reputation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersInfo {
    pub posts_count: u64,
    pub likes_count: u64,
    pub potd_count: u64,
    pub pinned_by_user_count: u64,
    pub pinned_count: u64,
    pub replies_count: u64,
}

impl From<&ReputationCounters> for CountersInfo {
    fn from(counters: &ReputationCounters) -> Self {
        Self {
            posts_count: counters.posts_count,
            likes_count: counters.likes_count,
            potd_count: counters.potd_count,
            pinned_by_user_count: counters.pinned_by_user_count,
            pinned_count: counters.pinned_count,
            replies_count: counters.replies_count,
        }
    }
}

/// API response for an applied reputation event.
///
/// Values are returned unfiltered. This is the acknowledgement sent to the
/// forum service that reported the event, not a public read view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyEventResponse {
    /// The ID of the persisted reputation event.
    pub event_id: Option<i64>,
    pub target_id: String,
    pub kind: String,
    pub delta: i64,
    pub counters: CountersInfo,
    pub points: u64,
    pub status: String,
    pub previous_status: String,
    pub status_changed: bool,
    /// A success message.
    pub message: String,
}

/// API response for a user's standing.
///
/// For status-exempt roles `status`, `points`, `next_status` and
/// `points_to_next` are omitted and `display_status` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingResponse {
    pub user_id: String,
    pub username: String,
    pub role: String,
    /// RFC 3339 time the user was first synced.
    pub registered_at: String,
    /// Whether the presentation layer should render status and points.
    pub display_status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_to_next: Option<u64>,
    pub counters: CountersInfo,
    /// 1-based leaderboard position.
    pub position: usize,
    pub is_tied: bool,
    pub total_users: usize,
}

/// Query parameters for a leaderboard page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRequest {
    /// 1-based page number. Defaults to 1.
    #[serde(default)]
    pub page: Option<u32>,
    /// Entries per page. Defaults to 25, at most 100.
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// One leaderboard row, display policy applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntryInfo {
    pub position: usize,
    pub is_tied: bool,
    pub user_id: String,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// API response for a leaderboard page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntryInfo>,
    pub page: u32,
    pub page_size: u32,
    pub total_users: usize,
    pub total_pages: usize,
}

/// One entry of a user's reputation history.
///
/// Points and statuses are omitted for status-exempt roles, as in the
/// standing and leaderboard views. Counters in `details` are always shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    /// `RegisterUser` or the event kind.
    pub action: String,
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_before: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_after: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_after: Option<String>,
}

impl HistoryEntryInfo {
    /// Builds a history entry, hiding points and statuses unless
    /// `display_status` is set.
    #[must_use]
    pub fn from_event(event: &AuditEvent, display_status: bool) -> Self {
        let before: Option<&CounterSnapshot> = event.before.as_ref().filter(|_| display_status);
        let after: Option<&CounterSnapshot> = Some(&event.after).filter(|_| display_status);
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            points_before: before.map(|snapshot| snapshot.points),
            points_after: after.map(|snapshot| snapshot.points),
            status_before: before.map(|snapshot| snapshot.status.label().to_string()),
            status_after: after.map(|snapshot| snapshot.status.label().to_string()),
        }
    }
}

/// API response for a user's reputation history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub user_id: String,
    /// Whether points and statuses are shown for this user's role.
    pub display_status: bool,
    pub events: Vec<HistoryEntryInfo>,
}

/// One rung of the status ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub label: String,
    pub min_points: u64,
}

impl From<Status> for StatusInfo {
    fn from(status: Status) -> Self {
        Self {
            label: status.label().to_string(),
            min_points: status.min_points(),
        }
    }
}

/// API response listing the status ladder, highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusesResponse {
    pub statuses: Vec<StatusInfo>,
}
