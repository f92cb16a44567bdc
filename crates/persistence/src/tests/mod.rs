// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

#[cfg(feature = "mysql")]
mod backend_validation_tests;

use cageside::RankingEngine;
use cageside_audit::{Actor, Cause};
use cageside_domain::{Delta, EventKind, PointWeights, UserId, UserRole, Username};
use diesel::SqliteConnection;

use crate::{BackendConnection, Persistence};

pub fn create_test_actor() -> Actor {
    Actor::system("test-actor")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("thread-1"), String::from("Test operation"))
}

pub fn uid(value: &str) -> UserId {
    UserId::new(value).unwrap()
}

pub fn name(value: &str) -> Username {
    Username::new(value).unwrap()
}

pub fn create_test_engine() -> RankingEngine<Persistence> {
    RankingEngine::new(Persistence::new_in_memory().unwrap(), PointWeights::default())
}

/// Registers `id` as a member named after itself.
pub fn register_member(engine: &mut RankingEngine<Persistence>, id: &str) -> UserId {
    let user_id: UserId = uid(id);
    engine
        .register_user(
            user_id.clone(),
            name(id),
            UserRole::Member,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    user_id
}

/// Applies `count` increments of `kind` to `target`.
pub fn award(engine: &mut RankingEngine<Persistence>, target: &UserId, kind: EventKind, count: usize) {
    let fan: UserId = uid("fan");
    for _ in 0..count {
        engine
            .apply_event(&fan, target, kind, Delta::Increment, create_test_cause())
            .unwrap();
    }
}

/// Raw `SQLite` connection for tests that bypass the domain layer.
#[allow(unreachable_patterns)]
pub fn sqlite_conn(persistence: &mut Persistence) -> &mut SqliteConnection {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => conn,
        _ => panic!("expected a SQLite connection"),
    }
}
