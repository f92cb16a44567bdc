// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use cageside::RankingEngine;
use cageside_domain::PointWeights;
use cageside_persistence::Persistence;

use crate::{ApplyEventRequest, SyncUserRequest, apply_event, sync_user};

pub fn create_test_engine() -> RankingEngine<Persistence> {
    RankingEngine::new(
        Persistence::new_in_memory().expect("in-memory database"),
        PointWeights::default(),
    )
}

pub fn sync_request(user_id: &str, username: &str, role: Option<&str>) -> SyncUserRequest {
    SyncUserRequest {
        user_id: user_id.to_string(),
        username: username.to_string(),
        role: role.map(str::to_string),
    }
}

pub fn event_request(target_id: &str, kind: &str, delta: i64) -> ApplyEventRequest {
    ApplyEventRequest {
        actor_id: String::from("fan"),
        target_id: target_id.to_string(),
        kind: kind.to_string(),
        delta,
        cause_id: Some(String::from("thread-7")),
        cause_description: None,
    }
}

/// Syncs `user_id` as a member named after itself.
pub fn sync_member(engine: &mut RankingEngine<Persistence>, user_id: &str) {
    sync_user(engine, sync_request(user_id, user_id, None)).unwrap();
}

/// Applies `count` increments of `kind` to `target_id`.
pub fn award(engine: &mut RankingEngine<Persistence>, target_id: &str, kind: &str, count: usize) {
    for _ in 0..count {
        apply_event(engine, event_request(target_id, kind, 1)).unwrap();
    }
}
