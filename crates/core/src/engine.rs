// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use cageside_audit::{Actor, AuditEvent, Cause};
use cageside_domain::{
    Delta, DomainError, EventKind, LeaderboardPage, PageRequest, PointWeights, RankedEntry,
    Reputation, ScoreEntry, UserId, UserRole, UserStanding, Username, paginate, rank,
    standing_for, validate_username_unchanged,
};
use tracing::{debug, info};

use crate::apply::apply;
use crate::command::Command;
use crate::error::EngineError;
use crate::state::{LeaderboardEntry, SyncOutcome, TransitionResult};
use crate::store::ReputationStore;

/// Actor name recorded for registrations performed by the identity sync.
pub const IDENTITY_SYNC_ACTOR: &str = "identity-sync";

/// Maintains reputation for every forum user.
///
/// The engine holds no state besides the store handle and the weight table.
/// Every write goes through one atomic [`ReputationStore::commit_counters`]
/// call, and every read view is recomputed from a fresh snapshot.
#[derive(Debug)]
pub struct RankingEngine<S> {
    store: S,
    weights: PointWeights,
}

impl<S: ReputationStore> RankingEngine<S> {
    /// Creates an engine over `store` using `weights` for point awards.
    #[must_use]
    pub const fn new(store: S, weights: PointWeights) -> Self {
        Self { store, weights }
    }

    /// The configured point weights.
    #[must_use]
    pub const fn weights(&self) -> &PointWeights {
        &self.weights
    }

    /// Mutable access to the underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Creates a zeroed record for a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateUser`] if the user already exists, or
    /// a store error.
    pub fn register_user(
        &mut self,
        user_id: UserId,
        username: Username,
        role: UserRole,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, EngineError<S::Error>> {
        let target: UserId = user_id.clone();
        let weights: &PointWeights = &self.weights;
        let command: Command = Command::RegisterUser {
            user_id,
            username,
            role,
        };

        let result: TransitionResult = self.store.commit_counters(&target, |current| {
            apply(current, command, weights, actor, cause)
        })?;

        info!(
            user_id = %target,
            username = %result.after.username(),
            role = %result.after.role(),
            "Registered user"
        );
        Ok(result)
    }

    /// Creates the user's record on first sync and returns it unchanged on
    /// later syncs.
    ///
    /// A new record gets `role`, or [`UserRole::Member`] when none is
    /// supplied. On later syncs a supplied role that differs is stored and a
    /// missing one keeps the stored role. A changed username is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UsernameImmutable`] if `username` differs from
    /// the stored one, or a store error.
    pub fn sync_user(
        &mut self,
        user_id: UserId,
        username: Username,
        role: Option<UserRole>,
    ) -> Result<SyncOutcome, EngineError<S::Error>> {
        if let Some(existing) = self
            .store
            .get_counters(&user_id)
            .map_err(EngineError::Store)?
        {
            return self.refresh_existing(existing, &username, role);
        }

        let actor: Actor = Actor::system(IDENTITY_SYNC_ACTOR);
        let cause: Cause = Cause::new(
            format!("sync-{user_id}"),
            String::from("First identity sync"),
        );
        let initial_role: UserRole = role.unwrap_or_default();
        match self.register_user(user_id.clone(), username.clone(), initial_role, actor, cause) {
            Ok(result) => Ok(SyncOutcome {
                reputation: result.after,
                created: true,
            }),
            // A concurrent sync registered the user between our read and commit.
            Err(err) if matches!(err.domain_error(), Some(DomainError::DuplicateUser(_))) => {
                debug!(user_id = %user_id, "User registered concurrently, re-reading");
                let existing: Reputation = self.reputation(&user_id)?;
                self.refresh_existing(existing, &username, role)
            }
            Err(err) => Err(err),
        }
    }

    fn refresh_existing(
        &mut self,
        existing: Reputation,
        username: &Username,
        role: Option<UserRole>,
    ) -> Result<SyncOutcome, EngineError<S::Error>> {
        validate_username_unchanged(&existing, username)?;

        let Some(role) = role.filter(|role| *role != existing.role()) else {
            debug!(user_id = %existing.user_id(), "User already registered");
            return Ok(SyncOutcome {
                reputation: existing,
                created: false,
            });
        };

        info!(
            user_id = %existing.user_id(),
            from = %existing.role(),
            to = %role,
            "Updating user role"
        );
        self.store
            .set_role(existing.user_id(), role)
            .map_err(EngineError::Store)?;
        let reputation: Reputation = Reputation::from_stored(
            existing.user_id().clone(),
            existing.username().clone(),
            role,
            existing.points(),
            *existing.counters(),
        );
        Ok(SyncOutcome {
            reputation,
            created: false,
        })
    }

    /// Applies one forum activity, or its reversal, to `target`.
    ///
    /// Counters, points, status and the audit row are committed together.
    ///
    /// # Arguments
    ///
    /// * `acting_user` - The user whose action caused the event
    /// * `target` - The user whose reputation changes
    /// * `kind` - What happened
    /// * `delta` - `+1` or `-1`
    /// * `cause` - Correlation id and description, usually the content id
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UserNotFound`] if `target` has no record, or a
    /// store error.
    pub fn apply_event(
        &mut self,
        acting_user: &UserId,
        target: &UserId,
        kind: EventKind,
        delta: Delta,
        cause: Cause,
    ) -> Result<TransitionResult, EngineError<S::Error>> {
        let weights: &PointWeights = &self.weights;
        let actor: Actor = Actor::user(acting_user);
        let command: Command = Command::ApplyEvent {
            target: target.clone(),
            kind,
            delta,
        };

        let result: TransitionResult = self.store.commit_counters(target, |current| {
            apply(current, command, weights, actor, cause)
        })?;

        info!(
            actor = %acting_user,
            target = %target,
            kind = %kind,
            delta = %delta,
            points = result.after.points(),
            status = %result.after.status(),
            "Applied reputation event"
        );
        if let Some(before) = &result.before {
            if before.status() != result.after.status() {
                info!(
                    target = %target,
                    from = %before.status(),
                    to = %result.after.status(),
                    "Status changed"
                );
            }
        }
        Ok(result)
    }

    /// Reads one user's record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UserNotFound`] if the user has no record, or a
    /// store error.
    pub fn reputation(&mut self, user_id: &UserId) -> Result<Reputation, EngineError<S::Error>> {
        self.store
            .get_counters(user_id)
            .map_err(EngineError::Store)?
            .ok_or_else(|| EngineError::from(DomainError::UserNotFound(user_id.clone())))
    }

    /// Reads when a user was registered.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UserNotFound`] if the user has no record, or a
    /// store error.
    pub fn registered_at(&mut self, user_id: &UserId) -> Result<String, EngineError<S::Error>> {
        self.store
            .registered_at(user_id)
            .map_err(EngineError::Store)?
            .ok_or_else(|| EngineError::from(DomainError::UserNotFound(user_id.clone())))
    }

    fn snapshot(&mut self) -> Result<Vec<Reputation>, EngineError<S::Error>> {
        self.store.score_snapshot().map_err(EngineError::Store)
    }

    fn ranked(snapshot: &[Reputation]) -> Vec<RankedEntry> {
        rank(
            snapshot
                .iter()
                .map(|reputation| ScoreEntry::new(reputation.user_id().clone(), reputation.points()))
                .collect(),
        )
    }

    /// Ranks every user and returns one page of the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns a store error if the snapshot cannot be read.
    pub fn leaderboard(
        &mut self,
        request: PageRequest,
    ) -> Result<LeaderboardPage<LeaderboardEntry>, EngineError<S::Error>> {
        let snapshot: Vec<Reputation> = self.snapshot()?;
        let ranked: Vec<RankedEntry> = Self::ranked(&snapshot);
        let by_id: HashMap<&UserId, &Reputation> = snapshot
            .iter()
            .map(|reputation| (reputation.user_id(), reputation))
            .collect();

        let page: LeaderboardPage<RankedEntry> = paginate(&ranked, request);
        let entries: Vec<LeaderboardEntry> = page
            .entries
            .iter()
            .filter_map(|entry| {
                by_id
                    .get(&entry.user_id)
                    .map(|reputation| LeaderboardEntry::new(entry, reputation))
            })
            .collect();

        debug!(
            page = page.page,
            page_size = page.page_size,
            total_users = page.total_users,
            "Computed leaderboard page"
        );
        Ok(LeaderboardPage {
            entries,
            page: page.page,
            page_size: page.page_size,
            total_users: page.total_users,
            total_pages: page.total_pages,
        })
    }

    /// Returns a user's record together with their leaderboard position.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UserNotFound`] if the user has no record, or a
    /// store error.
    pub fn standing(
        &mut self,
        user_id: &UserId,
    ) -> Result<(Reputation, UserStanding), EngineError<S::Error>> {
        let snapshot: Vec<Reputation> = self.snapshot()?;
        let ranked: Vec<RankedEntry> = Self::ranked(&snapshot);
        let standing: UserStanding = standing_for(&ranked, user_id)
            .ok_or_else(|| DomainError::UserNotFound(user_id.clone()))?;
        let reputation: Reputation = snapshot
            .into_iter()
            .find(|reputation| reputation.user_id() == user_id)
            .ok_or_else(|| DomainError::UserNotFound(user_id.clone()))?;
        Ok((reputation, standing))
    }

    /// Returns the audit trail for a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UserNotFound`] if the user has no record, or a
    /// store error.
    pub fn history(&mut self, user_id: &UserId) -> Result<Vec<AuditEvent>, EngineError<S::Error>> {
        self.reputation(user_id)?;
        self.store.audit_trail(user_id).map_err(EngineError::Store)
    }
}
