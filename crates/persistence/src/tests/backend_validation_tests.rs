// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for `MariaDB`/`MySQL`.
//!
//! Compiled only with the `mysql` feature and marked `#[ignore]`. Run them
//! with `cargo xtask test-mariadb`, which provisions a container and sets
//! `DATABASE_URL` and `CAGESIDE_TEST_BACKEND=mariadb`.
//!
//! These tests cover schema compatibility and constraint enforcement.
//! Business rules are covered by the `SQLite` suite.

use std::env;

use cageside::{RankingEngine, ReputationStore};
use cageside_domain::{EventKind, PointWeights, Reputation, UserId};
use diesel::MysqlConnection;
use diesel::prelude::*;

use crate::Persistence;
use crate::backend::mysql;
use crate::tests::{award, register_member};

/// # Panics
///
/// Panics if `DATABASE_URL` is not set.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// # Panics
///
/// Panics if `CAGESIDE_TEST_BACKEND` is not `mariadb`.
fn verify_mariadb_test_environment() {
    let backend: String = env::var("CAGESIDE_TEST_BACKEND").expect(
        "CAGESIDE_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "CAGESIDE_TEST_BACKEND must be 'mariadb'");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let result = mysql::initialize_database(&get_mariadb_url());
    assert!(result.is_ok(), "Failed to run migrations: {:?}", result.err());
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_foreign_key_enforcement() {
    verify_mariadb_test_environment();
    let mut conn: MysqlConnection = mysql::initialize_database(&get_mariadb_url()).unwrap();

    assert!(mysql::verify_foreign_key_enforcement(&mut conn).is_ok());

    let orphan = diesel::sql_query(
        "INSERT INTO reputation_events
         (user_id, actor_json, cause_json, action_json, after_snapshot_json, created_at)
         VALUES ('no-such-user', '{}', '{}', '{}', '{}', '2026-01-01T00:00:00Z')",
    )
    .execute(&mut conn);
    assert!(orphan.is_err(), "event for unknown user must violate the foreign key");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_user_primary_key_is_unique() {
    verify_mariadb_test_environment();
    let mut conn: MysqlConnection = mysql::initialize_database(&get_mariadb_url()).unwrap();

    let insert = "INSERT INTO users (user_id, username, role, status, registered_at)
                  VALUES ('pk-check', 'PK Check', 'MEMBER', 'AMATEUR', '2026-01-01T00:00:00Z')";
    diesel::sql_query(insert).execute(&mut conn).unwrap();
    assert!(diesel::sql_query(insert).execute(&mut conn).is_err());
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_commit_round_trip() {
    verify_mariadb_test_environment();
    let mut engine: RankingEngine<Persistence> = RankingEngine::new(
        Persistence::new_with_mysql(&get_mariadb_url()).unwrap(),
        PointWeights::default(),
    );

    let user: UserId = register_member(&mut engine, "mariadb-round-trip");
    award(&mut engine, &user, EventKind::LikeReceived, 2);

    let stored: Reputation = engine.store_mut().get_counters(&user).unwrap().unwrap();
    assert_eq!(stored.points(), 2);
    assert_eq!(engine.store_mut().audit_trail(&user).unwrap().len(), 3);
}
