// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use crate::{CoreError, EngineError, RankingEngine, ReputationStore, TransitionResult};
use cageside_audit::{Actor, AuditEvent, Cause};
use cageside_domain::{PointWeights, Reputation, UserId, UserRole, Username};

#[derive(Debug)]
pub struct StoreFailure;

impl std::fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("store unavailable")
    }
}

impl std::error::Error for StoreFailure {}

/// Registration time recorded by [`MemoryStore`].
pub const TEST_REGISTERED_AT: &str = "2026-01-01T00:00:00Z";

/// Store backed by maps, with a switch to simulate outages.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: BTreeMap<UserId, Reputation>,
    pub events: Vec<AuditEvent>,
    pub registered: BTreeMap<UserId, String>,
    pub failing: bool,
}

impl MemoryStore {
    fn check(&self) -> Result<(), StoreFailure> {
        if self.failing { Err(StoreFailure) } else { Ok(()) }
    }
}

impl ReputationStore for MemoryStore {
    type Error = StoreFailure;

    fn get_counters(&mut self, user_id: &UserId) -> Result<Option<Reputation>, Self::Error> {
        self.check()?;
        Ok(self.users.get(user_id).cloned())
    }

    fn commit_counters<F>(
        &mut self,
        user_id: &UserId,
        transition: F,
    ) -> Result<TransitionResult, EngineError<Self::Error>>
    where
        F: FnOnce(Option<&Reputation>) -> Result<TransitionResult, CoreError>,
    {
        self.check().map_err(EngineError::Store)?;
        let result: TransitionResult = transition(self.users.get(user_id))?;
        let mut event: AuditEvent = result.audit_event.clone();
        event.event_id = Some(i64::try_from(self.events.len()).unwrap() + 1);
        self.events.push(event.clone());
        if result.before.is_none() {
            self.registered
                .insert(user_id.clone(), String::from(TEST_REGISTERED_AT));
        }
        self.users.insert(user_id.clone(), result.after.clone());
        Ok(TransitionResult {
            audit_event: event,
            ..result
        })
    }

    fn set_role(&mut self, user_id: &UserId, role: UserRole) -> Result<(), Self::Error> {
        self.check()?;
        if let Some(existing) = self.users.get(user_id).cloned() {
            self.users.insert(
                user_id.clone(),
                Reputation::from_stored(
                    existing.user_id().clone(),
                    existing.username().clone(),
                    role,
                    existing.points(),
                    *existing.counters(),
                ),
            );
        }
        Ok(())
    }

    fn registered_at(&mut self, user_id: &UserId) -> Result<Option<String>, Self::Error> {
        self.check()?;
        Ok(self.registered.get(user_id).cloned())
    }

    fn score_snapshot(&mut self) -> Result<Vec<Reputation>, Self::Error> {
        self.check()?;
        Ok(self.users.values().cloned().collect())
    }

    fn audit_trail(&mut self, user_id: &UserId) -> Result<Vec<AuditEvent>, Self::Error> {
        self.check()?;
        Ok(self
            .events
            .iter()
            .filter(|event| &event.user_id == user_id)
            .cloned()
            .collect())
    }
}

pub fn create_test_actor() -> Actor {
    Actor::user(&uid("moderator-1"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("post-456"), String::from("Forum activity"))
}

pub fn uid(value: &str) -> UserId {
    UserId::new(value).unwrap()
}

pub fn name(value: &str) -> Username {
    Username::new(value).unwrap()
}

pub fn create_test_engine() -> RankingEngine<MemoryStore> {
    RankingEngine::new(MemoryStore::default(), PointWeights::default())
}

pub fn create_test_member(engine: &mut RankingEngine<MemoryStore>, id: &str) -> UserId {
    let user_id: UserId = uid(id);
    engine
        .sync_user(user_id.clone(), name(id), Some(UserRole::Member))
        .unwrap();
    user_id
}
