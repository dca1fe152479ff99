//! Integration test: DApp registration and weighted reputation reporting.
//!
//! Drives `ReputationLedger` end to end the way an owner and its
//! registered DApps would.

use repledger_core::{
    DAppInfo, LedgerError, UserScoreSnapshot, ValidationError, ERR_DAPP_NOT_REGISTERED,
    ERR_INVALID_SCORE, ERR_UNAUTHORIZED,
};
use repledger_engine::LedgerEvent;
use repledger_integration_tests::{ledger, ledger_with_dapp, principal, DAPP, OWNER, USER};

// =========================================================================
// Registry and access control
// =========================================================================

#[test]
fn test_owner_registers_dapp() {
    let (ledger, _) = ledger();
    ledger
        .register_dapp(&principal(OWNER), &principal(DAPP), "Test DApp", 10)
        .unwrap();

    assert_eq!(
        ledger.get_dapp_info(&principal(DAPP)),
        Some(DAppInfo {
            name: "Test DApp".into(),
            weight: 10,
            is_active: true,
        })
    );
    assert_eq!(ledger.dapps(), vec![principal(DAPP)]);
}

#[test]
fn test_non_owner_cannot_register() {
    let (ledger, _) = ledger();
    let err = ledger
        .register_dapp(&principal(DAPP), &principal(DAPP), "Test DApp", 10)
        .unwrap_err();

    assert_eq!(err.code(), ERR_UNAUTHORIZED);
    assert!(ledger.get_dapp_info(&principal(DAPP)).is_none());
    assert!(ledger.journal().is_empty());
}

#[test]
fn test_unauthorized_wins_over_bad_arguments() {
    let (ledger, _) = ledger();
    let err = ledger
        .register_dapp(&principal(USER), &principal(DAPP), "", 0)
        .unwrap_err();
    assert_eq!(err.code(), ERR_UNAUTHORIZED);
}

#[test]
fn test_duplicate_registration_keeps_original() {
    let (ledger, _) = ledger_with_dapp();
    let err = ledger
        .register_dapp(&principal(OWNER), &principal(DAPP), "Renamed", 99)
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::Validation(ValidationError::DuplicateDApp(principal(DAPP)))
    );
    let info = ledger.get_dapp_info(&principal(DAPP)).unwrap();
    assert_eq!(info.name, "Test DApp");
    assert_eq!(info.weight, 10);
}

#[test]
fn test_unknown_dapp_info_is_none() {
    let (ledger, _) = ledger_with_dapp();
    assert!(ledger.get_dapp_info(&principal("ST9UNKNOWN")).is_none());
}

// =========================================================================
// Reporting
// =========================================================================

#[test]
fn test_unseen_user_reads_default() {
    let (ledger, _) = ledger_with_dapp();
    assert_eq!(
        ledger.get_user_score(&principal(USER)),
        UserScoreSnapshot {
            total_score: 50,
            interaction_count: 0,
            last_updated: 0,
        }
    );
    assert!(ledger.get_user_record(&principal(USER)).is_none());
}

#[test]
fn test_first_interaction_takes_raw_score() {
    let (ledger, _) = ledger_with_dapp();
    let snapshot = ledger
        .report_interaction(&principal(DAPP), &principal(USER), 75, "positive-review")
        .unwrap();

    assert_eq!(snapshot.total_score, 75);
    assert_eq!(snapshot.interaction_count, 1);
    assert_eq!(snapshot.last_updated, 1);
    assert_eq!(ledger.get_user_score(&principal(USER)), snapshot);
}

#[test]
fn test_invalid_score_rejected() {
    let (ledger, _) = ledger_with_dapp();
    for score in [101, -1, 1_000] {
        let err = ledger
            .report_interaction(&principal(DAPP), &principal(USER), score, "positive-review")
            .unwrap_err();
        assert_eq!(err.code(), ERR_INVALID_SCORE);
    }
    assert_eq!(ledger.get_user_score(&principal(USER)).interaction_count, 0);
}

#[test]
fn test_boundary_scores_accepted() {
    let (ledger, _) = ledger_with_dapp();
    let low = ledger
        .report_interaction(&principal(DAPP), &principal("ST4LOW"), 0, "negative-review")
        .unwrap();
    let high = ledger
        .report_interaction(&principal(DAPP), &principal("ST4HIGH"), 100, "positive-review")
        .unwrap();
    assert_eq!(low.total_score, 0);
    assert_eq!(high.total_score, 100);
}

#[test]
fn test_unregistered_dapp_rejected() {
    let (ledger, _) = ledger_with_dapp();
    let err = ledger
        .report_interaction(&principal("ST9UNKNOWN"), &principal(USER), 75, "positive-review")
        .unwrap_err();
    assert_eq!(err.code(), ERR_DAPP_NOT_REGISTERED);
}

#[test]
fn test_score_checked_before_registration() {
    let (ledger, _) = ledger();
    let err = ledger
        .report_interaction(&principal(DAPP), &principal(USER), 150, "positive-review")
        .unwrap_err();
    assert_eq!(err, LedgerError::InvalidScore(150));
}

#[test]
fn test_weighted_sequence() {
    let (ledger, clock) = ledger_with_dapp();
    let dapp = principal(DAPP);
    let user = principal(USER);

    for (score, category) in [
        (80, "positive-review"),
        (60, "neutral-review"),
        (90, "positive-review"),
    ] {
        clock.advance(1);
        ledger
            .report_interaction(&dapp, &user, score, category)
            .unwrap();
    }

    let snapshot = ledger.get_user_score(&user);
    assert!((75..=78).contains(&snapshot.total_score));
    assert_eq!(snapshot.total_score, 76);
    assert_eq!(snapshot.interaction_count, 3);
    assert_eq!(snapshot.last_updated, 4);
}

#[test]
fn test_report_order_matters_across_weights() {
    let (ledger, _) = ledger();
    let owner = principal(OWNER);
    for (id, weight) in [("ST5LIGHT", 5), ("ST5MID", 10), ("ST5HEAVY", 30)] {
        ledger
            .register_dapp(&owner, &principal(id), id, weight)
            .unwrap();
    }

    let forward = principal("ST6FORWARD");
    for (dapp, score) in [("ST5MID", 75), ("ST5HEAVY", 40), ("ST5LIGHT", 99)] {
        ledger
            .report_interaction(&principal(dapp), &forward, score, "review")
            .unwrap();
    }

    let reordered = principal("ST6REORDERED");
    for (dapp, score) in [("ST5MID", 75), ("ST5LIGHT", 99), ("ST5HEAVY", 40)] {
        ledger
            .report_interaction(&principal(dapp), &reordered, score, "review")
            .unwrap();
    }

    assert_eq!(ledger.get_user_score(&forward).total_score, 53);
    assert_eq!(ledger.get_user_score(&reordered).total_score, 54);
    assert_eq!(ledger.get_user_record(&forward).unwrap().accumulated_weight, 45);
}

#[test]
fn test_last_updated_follows_clock() {
    let (ledger, clock) = ledger_with_dapp();
    let dapp = principal(DAPP);
    let user = principal(USER);

    let mut previous = 0;
    for blocks in [0, 3, 0, 7] {
        clock.advance(blocks);
        let snapshot = ledger
            .report_interaction(&dapp, &user, 60, "review")
            .unwrap();
        assert!(snapshot.last_updated >= previous);
        previous = snapshot.last_updated;
    }
    assert_eq!(previous, 11);
}

// =========================================================================
// Lifecycle operations
// =========================================================================

#[test]
fn test_deactivated_dapp_cannot_report() {
    let (ledger, _) = ledger_with_dapp();
    let owner = principal(OWNER);
    let dapp = principal(DAPP);
    let user = principal(USER);

    ledger.set_dapp_active(&owner, &dapp, false).unwrap();
    assert!(!ledger.get_dapp_info(&dapp).unwrap().is_active);
    let err = ledger
        .report_interaction(&dapp, &user, 75, "positive-review")
        .unwrap_err();
    assert_eq!(err.code(), ERR_DAPP_NOT_REGISTERED);

    ledger.set_dapp_active(&owner, &dapp, true).unwrap();
    ledger
        .report_interaction(&dapp, &user, 75, "positive-review")
        .unwrap();
    assert_eq!(ledger.get_user_score(&user).interaction_count, 1);
}

#[test]
fn test_weight_update_applies_to_future_reports() {
    let (ledger, _) = ledger_with_dapp();
    let owner = principal(OWNER);
    let dapp = principal(DAPP);
    let user = principal(USER);

    ledger.report_interaction(&dapp, &user, 80, "review").unwrap();
    ledger.update_dapp_weight(&owner, &dapp, 30).unwrap();
    // (80 * 10 + 40 * 30) / 40 = 50
    let snapshot = ledger.report_interaction(&dapp, &user, 40, "review").unwrap();
    assert_eq!(snapshot.total_score, 50);

    let err = ledger
        .update_dapp_weight(&principal(USER), &dapp, 1)
        .unwrap_err();
    assert_eq!(err.code(), ERR_UNAUTHORIZED);
    assert_eq!(ledger.get_dapp_info(&dapp).unwrap().weight, 30);
}

// =========================================================================
// Journal and serialization
// =========================================================================

#[test]
fn test_journal_records_accepted_operations_only() {
    let (ledger, _) = ledger_with_dapp();
    let dapp = principal(DAPP);
    let user = principal(USER);

    ledger.report_interaction(&dapp, &user, 70, "positive-review").unwrap();
    let _ = ledger.report_interaction(&dapp, &user, 101, "positive-review");
    let _ = ledger.register_dapp(&user, &user, "Nope", 1);

    let entries = ledger.journal().entries();
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[0].event, LedgerEvent::DAppRegistered { .. }));
    match &entries[1].event {
        LedgerEvent::InteractionRecorded {
            category,
            total_score,
            ..
        } => {
            assert_eq!(category, "positive-review");
            assert_eq!(*total_score, 70);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(ledger.journal().for_user(&user).len(), 1);
}

#[test]
fn test_snapshot_json_shape() {
    let (ledger, _) = ledger_with_dapp();
    let snapshot = ledger
        .report_interaction(&principal(DAPP), &principal(USER), 75, "positive-review")
        .unwrap();

    let json = serde_json::to_value(snapshot).unwrap();
    assert_eq!(json["totalScore"], 75);
    assert_eq!(json["interactionCount"], 1);
    assert_eq!(json["lastUpdated"], 1);

    let info = serde_json::to_value(ledger.get_dapp_info(&principal(DAPP))).unwrap();
    assert_eq!(info["isActive"], true);
}
