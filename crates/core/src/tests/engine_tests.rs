// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    MemoryStore, TEST_REGISTERED_AT, create_test_cause, create_test_engine, create_test_member,
    uid,
};
use crate::{EngineError, LeaderboardEntry, RankingEngine, TransitionResult};
use cageside_audit::AuditEvent;
use cageside_domain::{
    Delta, DomainError, EventKind, LeaderboardPage, PageRequest, PointWeights, Reputation, Status,
    UserId, UserStanding, derive_status,
};

fn apply_many(
    engine: &mut RankingEngine<MemoryStore>,
    target: &UserId,
    kind: EventKind,
    count: usize,
) {
    let actor: UserId = uid("fan");
    for _ in 0..count {
        engine
            .apply_event(&actor, target, kind, Delta::Increment, create_test_cause())
            .unwrap();
    }
}

#[test]
fn test_new_user_is_amateur_and_ranked() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    let user: UserId = create_test_member(&mut engine, "rookie");

    let (reputation, standing): (Reputation, UserStanding) = engine.standing(&user).unwrap();
    assert_eq!(reputation.status(), Status::Amateur);
    assert_eq!(standing.position, 1);
    assert_eq!(standing.total_users, 1);
}

#[test]
fn test_reaching_champion_moves_up_the_leaderboard() {
    let weights: PointWeights =
        PointWeights::from_entries(vec![(String::from("POTD_RECEIVED"), 100)]).unwrap();
    let mut engine: RankingEngine<MemoryStore> =
        RankingEngine::new(MemoryStore::default(), weights);

    let veteran: UserId = create_test_member(&mut engine, "veteran");
    let rookie: UserId = create_test_member(&mut engine, "rookie");
    apply_many(&mut engine, &veteran, EventKind::LikeReceived, 600);

    let (_, before): (Reputation, UserStanding) = engine.standing(&rookie).unwrap();
    assert_eq!(before.position, 2);

    // 51 POTDs at 100 points each
    apply_many(&mut engine, &rookie, EventKind::PotdReceived, 51);

    let (reputation, after): (Reputation, UserStanding) = engine.standing(&rookie).unwrap();
    assert_eq!(reputation.points(), 5100);
    assert_eq!(reputation.status(), Status::Champion);
    assert_eq!(reputation.counters().potd_count, 51);
    assert_eq!(after.position, 1);
    assert!(!after.is_tied);

    let page: LeaderboardPage<LeaderboardEntry> =
        engine.leaderboard(PageRequest::default()).unwrap();
    assert_eq!(page.entries[0].user_id, rookie);
    assert_eq!(page.entries[0].status, Status::Champion);
    assert_eq!(page.entries[1].user_id, veteran);
    assert_eq!(page.entries[1].status, Status::RankedPoster);
}

#[test]
fn test_apply_event_to_unknown_user_writes_nothing() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();

    let err: EngineError<_> = engine
        .apply_event(
            &uid("fan"),
            &uid("ghost"),
            EventKind::LikeReceived,
            Delta::Increment,
            create_test_cause(),
        )
        .unwrap_err();

    assert_eq!(
        err.domain_error(),
        Some(&DomainError::UserNotFound(uid("ghost")))
    );
    assert!(engine.store_mut().events.is_empty());
    assert!(engine.store_mut().users.is_empty());
}

#[test]
fn test_retraction_restores_counters() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    let user: UserId = create_test_member(&mut engine, "poster");
    apply_many(&mut engine, &user, EventKind::PostCreated, 3);

    let before: Reputation = engine.reputation(&user).unwrap();
    engine
        .apply_event(&user, &user, EventKind::PinReceived, Delta::Increment, create_test_cause())
        .unwrap();
    engine
        .apply_event(&user, &user, EventKind::PinReceived, Delta::Decrement, create_test_cause())
        .unwrap();

    assert_eq!(engine.reputation(&user).unwrap(), before);
}

#[test]
fn test_status_tracks_points_after_any_sequence() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    let user: UserId = create_test_member(&mut engine, "mixed");

    for step in 0..120_usize {
        let kind: EventKind = EventKind::all()[step % EventKind::all().len()];
        let delta: Delta = if step % 4 == 3 {
            Delta::Decrement
        } else {
            Delta::Increment
        };
        let result: TransitionResult = engine
            .apply_event(&uid("fan"), &user, kind, delta, create_test_cause())
            .unwrap();
        assert_eq!(result.after.status(), derive_status(result.after.points()));
    }

    let reputation: Reputation = engine.reputation(&user).unwrap();
    assert_eq!(reputation.status(), derive_status(reputation.points()));
    assert_eq!(reputation.status(), Status::RegionalPoster);
}

#[test]
fn test_leaderboard_ties_and_pagination() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    for (id, likes) in [("a", 100), ("b", 100), ("c", 90), ("d", 80), ("e", 80), ("f", 80)] {
        let user: UserId = create_test_member(&mut engine, id);
        apply_many(&mut engine, &user, EventKind::LikeReceived, likes);
    }

    let first: LeaderboardPage<LeaderboardEntry> =
        engine.leaderboard(PageRequest::new(1, 4).unwrap()).unwrap();
    let positions: Vec<usize> = first.entries.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 1, 3, 4]);
    assert_eq!(first.total_users, 6);
    assert_eq!(first.total_pages, 2);

    let second: LeaderboardPage<LeaderboardEntry> =
        engine.leaderboard(PageRequest::new(2, 4).unwrap()).unwrap();
    let ids: Vec<&str> = second.entries.iter().map(|e| e.user_id.as_str()).collect();
    assert_eq!(ids, vec!["e", "f"]);
    assert!(second.entries.iter().all(|e| e.position == 4 && e.is_tied));

    let beyond: LeaderboardPage<LeaderboardEntry> =
        engine.leaderboard(PageRequest::new(3, 4).unwrap()).unwrap();
    assert!(beyond.entries.is_empty());
}

#[test]
fn test_history_is_oldest_first() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    let user: UserId = create_test_member(&mut engine, "historian");
    apply_many(&mut engine, &user, EventKind::ReplyReceived, 2);

    let history: Vec<AuditEvent> = engine.history(&user).unwrap();
    let actions: Vec<&str> = history.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(actions, vec!["RegisterUser", "REPLY_RECEIVED", "REPLY_RECEIVED"]);
    assert_eq!(history[2].after.counters.replies_count, 2);
    assert_eq!(history[1].actor.id, "fan");
}

#[test]
fn test_history_of_unknown_user() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    let err = engine.history(&uid("ghost")).unwrap_err();
    assert_eq!(
        err.domain_error(),
        Some(&DomainError::UserNotFound(uid("ghost")))
    );
}

#[test]
fn test_registered_at_is_read_from_store() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    let user: UserId = create_test_member(&mut engine, "newcomer");

    assert_eq!(engine.registered_at(&user).unwrap(), TEST_REGISTERED_AT);
    let err = engine.registered_at(&uid("ghost")).unwrap_err();
    assert_eq!(
        err.domain_error(),
        Some(&DomainError::UserNotFound(uid("ghost")))
    );
}

#[test]
fn test_store_failure_is_surfaced_unchanged() {
    let mut engine: RankingEngine<MemoryStore> = create_test_engine();
    let user: UserId = create_test_member(&mut engine, "victim");
    engine.store_mut().failing = true;

    let err = engine
        .apply_event(&uid("fan"), &user, EventKind::LikeReceived, Delta::Increment, create_test_cause())
        .unwrap_err();
    assert!(matches!(err, EngineError::Store(_)));
    assert_eq!(err.to_string(), "Store error: store unavailable");

    engine.store_mut().failing = false;
    assert_eq!(engine.reputation(&user).unwrap().points(), 0);
}
