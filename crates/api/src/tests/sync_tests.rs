// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cageside::RankingEngine;
use cageside_persistence::Persistence;

use crate::tests::helpers::{create_test_engine, sync_request};
use crate::{ApiError, StandingResponse, SyncUserResponse, get_standing, sync_user};

#[test]
fn test_first_sync_creates_member_by_default() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();

    let response: SyncUserResponse =
        sync_user(&mut engine, sync_request("u-1", "KnockoutKing", None)).unwrap();

    assert!(response.created);
    assert_eq!(response.user_id, "u-1");
    assert_eq!(response.username, "KnockoutKing");
    assert_eq!(response.role, "MEMBER");
}

#[test]
fn test_repeat_sync_returns_existing_record() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();
    sync_user(&mut engine, sync_request("u-1", "KnockoutKing", None)).unwrap();

    let response: SyncUserResponse =
        sync_user(&mut engine, sync_request("u-1", "KnockoutKing", None)).unwrap();

    assert!(!response.created);
}

#[test]
fn test_sync_accepts_role_case_insensitively() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();

    let response: SyncUserResponse = sync_user(
        &mut engine,
        sync_request("u-1", "Coach", Some("industry_professional")),
    )
    .unwrap();

    assert_eq!(response.role, "INDUSTRY_PROFESSIONAL");
}

#[test]
fn test_sync_with_changed_username_is_rule_violation() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();
    sync_user(&mut engine, sync_request("u-1", "KnockoutKing", None)).unwrap();

    let result: Result<SyncUserResponse, ApiError> =
        sync_user(&mut engine, sync_request("u-1", "SubmissionKing", None));

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "immutable_username");
        }
        other => panic!("expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_sync_rejects_unknown_role() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();

    let result: Result<SyncUserResponse, ApiError> =
        sync_user(&mut engine, sync_request("u-1", "Someone", Some("REFEREE")));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));
}

#[test]
fn test_sync_rejects_blank_user_id_and_username() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();

    let blank_id: Result<SyncUserResponse, ApiError> =
        sync_user(&mut engine, sync_request("", "Someone", None));
    assert!(matches!(
        blank_id,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "user_id"
    ));

    let blank_name: Result<SyncUserResponse, ApiError> =
        sync_user(&mut engine, sync_request("u-2", "   ", None));
    assert!(matches!(
        blank_name,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "username"
    ));
}

#[test]
fn test_resync_without_role_keeps_exempt_role() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();
    sync_user(&mut engine, sync_request("f-1", "Fighter", Some("FIGHTER"))).unwrap();

    let response: SyncUserResponse =
        sync_user(&mut engine, sync_request("f-1", "Fighter", None)).unwrap();
    let standing: StandingResponse = get_standing(&mut engine, "f-1").unwrap();

    assert!(!response.created);
    assert_eq!(response.role, "FIGHTER");
    assert_eq!(standing.role, "FIGHTER");
    assert!(!standing.display_status);
    assert!(standing.points.is_none());
}

#[test]
fn test_resync_with_new_role_replaces_stored_role() {
    let mut engine: RankingEngine<Persistence> = create_test_engine();
    sync_user(&mut engine, sync_request("f-1", "Fighter", Some("FIGHTER"))).unwrap();

    let response: SyncUserResponse =
        sync_user(&mut engine, sync_request("f-1", "Fighter", Some("MEMBER"))).unwrap();

    assert_eq!(response.role, "MEMBER");
    let standing: StandingResponse = get_standing(&mut engine, "f-1").unwrap();
    assert!(standing.display_status);
}
