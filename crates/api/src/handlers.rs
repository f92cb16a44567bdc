// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler parses its request into domain types, calls the engine,
//! and builds the response DTO. Parsing happens before any engine call, so
//! malformed input never reaches the store.

use cageside::{LeaderboardEntry, RankingEngine, ReputationStore, SyncOutcome, TransitionResult};
use cageside_audit::{AuditEvent, Cause};
use cageside_domain::{
    Delta, EventKind, LeaderboardPage, PageRequest, Reputation, Status, UserId, UserRole,
    UserStanding, Username,
};
use tracing::debug;

use crate::error::{ApiError, translate_domain_error, translate_engine_error};
use crate::request_response::{
    ApplyEventRequest, ApplyEventResponse, CountersInfo, HistoryEntryInfo, HistoryResponse,
    LeaderboardEntryInfo, LeaderboardRequest, LeaderboardResponse, StandingResponse,
    StatusInfo, StatusesResponse, SyncUserRequest, SyncUserResponse,
};

/// Parses a user id, reporting failures against `field`.
fn parse_user_id(field: &str, value: &str) -> Result<UserId, ApiError> {
    UserId::new(value).map_err(|e| ApiError::invalid(field, e.to_string()))
}

/// Builds the cause recorded with an event.
fn event_cause(request: &ApplyEventRequest, kind: EventKind, delta: Delta) -> Cause {
    let id: String = request
        .cause_id
        .clone()
        .unwrap_or_else(|| format!("{kind}:{}", request.target_id));
    let description: String = request
        .cause_description
        .clone()
        .unwrap_or_else(|| format!("{kind} {delta}"));
    Cause::new(id, description)
}

/// Creates or returns a user record for an identity sync.
///
/// # Errors
///
/// Returns an error if:
/// - The user id, username or role is invalid
/// - The username differs from the stored one
/// - The store fails
pub fn sync_user<S: ReputationStore>(
    engine: &mut RankingEngine<S>,
    request: SyncUserRequest,
) -> Result<SyncUserResponse, ApiError> {
    let user_id: UserId = parse_user_id("user_id", &request.user_id)?;
    let username: Username = Username::new(&request.username).map_err(translate_domain_error)?;
    // A missing role keeps the stored one; new users default to MEMBER.
    let role: Option<UserRole> = request
        .role
        .as_deref()
        .map(str::parse::<UserRole>)
        .transpose()
        .map_err(translate_domain_error)?;

    let outcome: SyncOutcome = engine
        .sync_user(user_id, username, role)
        .map_err(translate_engine_error)?;

    let reputation: &Reputation = &outcome.reputation;
    let message: String = if outcome.created {
        format!("Registered user '{}'", reputation.username())
    } else {
        format!("User '{}' already registered", reputation.username())
    };

    Ok(SyncUserResponse {
        user_id: reputation.user_id().to_string(),
        username: reputation.username().to_string(),
        role: reputation.role().to_string(),
        created: outcome.created,
        message,
    })
}

/// Applies one reputation event.
///
/// `kind` and `delta` are validated before the engine is called.
///
/// # Errors
///
/// Returns an error if:
/// - A user id is invalid
/// - The kind is unknown or the delta is not exactly `+1`/`-1`
/// - The target user does not exist
/// - The store fails
pub fn apply_event<S: ReputationStore>(
    engine: &mut RankingEngine<S>,
    request: ApplyEventRequest,
) -> Result<ApplyEventResponse, ApiError> {
    let acting_user: UserId = parse_user_id("actor_id", &request.actor_id)?;
    let target: UserId = parse_user_id("target_id", &request.target_id)?;
    let kind: EventKind = request.kind.parse().map_err(translate_domain_error)?;
    let delta: Delta = Delta::try_from(request.delta).map_err(translate_domain_error)?;
    let cause: Cause = event_cause(&request, kind, delta);

    let result: TransitionResult = engine
        .apply_event(&acting_user, &target, kind, delta, cause)
        .map_err(translate_engine_error)?;

    let previous_status: Status = result
        .before
        .as_ref()
        .map_or(result.after.status(), Reputation::status);

    Ok(ApplyEventResponse {
        event_id: result.audit_event.event_id,
        target_id: target.to_string(),
        kind: kind.to_string(),
        delta: delta.as_i64(),
        counters: CountersInfo::from(result.after.counters()),
        points: result.after.points(),
        status: result.after.status().label().to_string(),
        previous_status: previous_status.label().to_string(),
        status_changed: previous_status != result.after.status(),
        message: format!("Applied {kind} {delta} to '{target}'"),
    })
}

/// Returns a user's standing with the role display policy applied.
///
/// # Errors
///
/// Returns an error if the user id is invalid, the user does not exist, or
/// the store fails.
pub fn get_standing<S: ReputationStore>(
    engine: &mut RankingEngine<S>,
    user_id: &str,
) -> Result<StandingResponse, ApiError> {
    let user_id: UserId = parse_user_id("user_id", user_id)?;
    let (reputation, standing): (Reputation, UserStanding) =
        engine.standing(&user_id).map_err(translate_engine_error)?;
    let registered_at: String = engine
        .registered_at(&user_id)
        .map_err(translate_engine_error)?;

    let display_status: bool = !reputation.role().is_status_exempt();

    Ok(StandingResponse {
        user_id: reputation.user_id().to_string(),
        username: reputation.username().to_string(),
        role: reputation.role().to_string(),
        registered_at,
        display_status,
        status: display_status.then(|| standing.status.label().to_string()),
        points: display_status.then_some(standing.points),
        next_status: standing
            .status
            .next()
            .filter(|_| display_status)
            .map(|next| next.label().to_string()),
        points_to_next: Status::points_to_next(standing.points).filter(|_| display_status),
        counters: CountersInfo::from(reputation.counters()),
        position: standing.position,
        is_tied: standing.is_tied,
        total_users: standing.total_users,
    })
}

/// Returns one leaderboard page with the role display policy applied.
///
/// Exempt users keep their position; only their points and status are
/// hidden.
///
/// # Errors
///
/// Returns an error if the page request is invalid or the store fails.
pub fn get_leaderboard<S: ReputationStore>(
    engine: &mut RankingEngine<S>,
    request: LeaderboardRequest,
) -> Result<LeaderboardResponse, ApiError> {
    let defaults: PageRequest = PageRequest::default();
    let page_request: PageRequest = PageRequest::new(
        request.page.unwrap_or(defaults.page()),
        request.page_size.unwrap_or(defaults.page_size()),
    )
    .map_err(translate_domain_error)?;

    let page: LeaderboardPage<LeaderboardEntry> = engine
        .leaderboard(page_request)
        .map_err(translate_engine_error)?;
    debug!(
        page = page.page,
        entries = page.entries.len(),
        "Serving leaderboard page"
    );

    let page: LeaderboardPage<LeaderboardEntryInfo> = page.map(|entry| {
        let display_status: bool = !entry.role.is_status_exempt();
        LeaderboardEntryInfo {
            position: entry.position,
            is_tied: entry.is_tied,
            user_id: entry.user_id.to_string(),
            username: entry.username.to_string(),
            role: entry.role.to_string(),
            points: display_status.then_some(entry.points),
            status: display_status.then(|| entry.status.label().to_string()),
        }
    });

    Ok(LeaderboardResponse {
        entries: page.entries,
        page: page.page,
        page_size: page.page_size,
        total_users: page.total_users,
        total_pages: page.total_pages,
    })
}

/// Returns a user's reputation history, oldest first, with the role display
/// policy applied.
///
/// # Errors
///
/// Returns an error if the user id is invalid, the user does not exist, or
/// the store fails.
pub fn get_history<S: ReputationStore>(
    engine: &mut RankingEngine<S>,
    user_id: &str,
) -> Result<HistoryResponse, ApiError> {
    let user_id: UserId = parse_user_id("user_id", user_id)?;
    let reputation: Reputation = engine
        .reputation(&user_id)
        .map_err(translate_engine_error)?;
    let events: Vec<AuditEvent> = engine.history(&user_id).map_err(translate_engine_error)?;
    let display_status: bool = !reputation.role().is_status_exempt();

    Ok(HistoryResponse {
        user_id: user_id.to_string(),
        display_status,
        events: events
            .iter()
            .map(|event| HistoryEntryInfo::from_event(event, display_status))
            .collect(),
    })
}

/// Returns the status ladder, highest threshold first.
#[must_use]
pub fn list_statuses() -> StatusesResponse {
    StatusesResponse {
        statuses: Status::ladder().iter().copied().map(StatusInfo::from).collect(),
    }
}
