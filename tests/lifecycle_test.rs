///! Tests for the approval transition table and the status reconciliation
///! planner. Planning is pure, so no database is needed.
///!
///! Run with: `cargo test --test lifecycle_test`
use uuid::Uuid;

use tracer_backend::lifecycle::{
    AccountStatus, ProfileStatus, SyncOutcome, can_transition, check_transition, normalize_email,
    plan_sync,
};
use tracer_backend::models::graduates::GraduateStatus;

fn profile(id: u128, email: Option<&str>, status: GraduateStatus) -> ProfileStatus {
    ProfileStatus {
        id: Uuid::from_u128(id),
        email: email.map(str::to_string),
        status,
    }
}

fn account(id: u128, email: &str, status: &str) -> AccountStatus {
    AccountStatus {
        id: Uuid::from_u128(id),
        email: email.to_string(),
        status: status.to_string(),
    }
}

#[test]
fn test_transition_table_is_closed() {
    use GraduateStatus::*;

    // Allowed edges.
    assert!(can_transition(&Pending, &Approved));
    assert!(can_transition(&Pending, &Rejected));
    assert!(can_transition(&Approved, &Pending));
    assert!(can_transition(&Rejected, &Pending));

    // Approved and rejected never swap directly; a reversal passes
    // through pending.
    assert!(!can_transition(&Approved, &Rejected));
    assert!(!can_transition(&Rejected, &Approved));

    // Re-asserting the current status is not a transition.
    assert!(!can_transition(&Pending, &Pending));
    assert!(!can_transition(&Approved, &Approved));
    assert!(!can_transition(&Rejected, &Rejected));
}

#[test]
fn test_refused_transition_names_both_states() {
    let err = check_transition(&GraduateStatus::Approved, &GraduateStatus::Rejected).unwrap_err();
    assert_eq!(err.to_string(), "cannot move a approved record to rejected");
}

#[test]
fn test_sync_overwrites_only_differing_accounts() {
    let profiles = vec![profile(1, Some("ana@example.com"), GraduateStatus::Approved)];
    let accounts = vec![account(10, "ana@example.com", "pending")];

    let plan = plan_sync(&profiles, &accounts);
    assert_eq!(plan.summary.processed, 1);
    assert_eq!(plan.summary.synced, 1);
    assert_eq!(plan.summary.already_in_sync, 0);
    assert_eq!(plan.summary.not_found, 0);
    assert!(matches!(
        plan.actions[0].outcome,
        SyncOutcome::Synced { user_id, ref status }
            if user_id == Uuid::from_u128(10) && *status == GraduateStatus::Approved
    ));
}

#[test]
fn test_sync_is_idempotent() {
    let profiles = vec![
        profile(1, Some("ana@example.com"), GraduateStatus::Approved),
        profile(2, Some("ben@example.com"), GraduateStatus::Rejected),
    ];
    let mut accounts = vec![
        account(10, "ana@example.com", "pending"),
        account(11, "ben@example.com", "pending"),
    ];

    let first = plan_sync(&profiles, &accounts);
    assert_eq!(first.summary.synced, 2);

    // Apply the planned writes, then plan again with no other changes.
    for action in &first.actions {
        if let SyncOutcome::Synced { user_id, status } = &action.outcome {
            let target = accounts.iter_mut().find(|a| a.id == *user_id).unwrap();
            target.status = status.as_str().to_string();
        }
    }

    let second = plan_sync(&profiles, &accounts);
    assert_eq!(second.summary.synced, 0);
    assert_eq!(second.summary.already_in_sync, 2);
    assert_eq!(second.summary.processed, 2);
}

#[test]
fn test_unmatched_profile_does_not_stop_the_batch() {
    // The middle profile has no matching account; the other two must still
    // be processed normally.
    let profiles = vec![
        profile(1, Some("ana@example.com"), GraduateStatus::Approved),
        profile(2, Some("ghost@example.com"), GraduateStatus::Approved),
        profile(3, Some("carla@example.com"), GraduateStatus::Rejected),
    ];
    let accounts = vec![
        account(10, "ana@example.com", "pending"),
        account(12, "carla@example.com", "pending"),
    ];

    let plan = plan_sync(&profiles, &accounts);
    assert_eq!(plan.summary.processed, 3);
    assert_eq!(plan.summary.synced, 2);
    assert_eq!(plan.summary.not_found, 1);

    assert_eq!(plan.actions.len(), 3);
    assert_eq!(plan.actions[1].profile_id, Uuid::from_u128(2));
    assert!(matches!(plan.actions[1].outcome, SyncOutcome::NotFound));
    assert!(matches!(plan.actions[2].outcome, SyncOutcome::Synced { .. }));
}

#[test]
fn test_profiles_without_email_are_skipped() {
    let profiles = vec![
        profile(1, None, GraduateStatus::Approved),
        profile(2, Some("ana@example.com"), GraduateStatus::Approved),
    ];
    let accounts = vec![account(10, "ana@example.com", "pending")];

    let plan = plan_sync(&profiles, &accounts);
    assert_eq!(plan.summary.processed, 1);
    assert_eq!(plan.actions.len(), 1);
    assert_eq!(plan.actions[0].profile_id, Uuid::from_u128(2));
}

#[test]
fn test_email_matching_is_trimmed_and_case_insensitive() {
    assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");

    let profiles = vec![profile(1, Some(" Ana@Example.com"), GraduateStatus::Approved)];
    let accounts = vec![account(10, "ana@example.com ", "pending")];

    let plan = plan_sync(&profiles, &accounts);
    assert_eq!(plan.summary.synced, 1);
    assert_eq!(plan.summary.not_found, 0);
}

#[test]
fn test_first_account_wins_on_duplicate_emails() {
    let profiles = vec![profile(1, Some("ana@example.com"), GraduateStatus::Approved)];
    let accounts = vec![
        account(10, "ana@example.com", "pending"),
        account(11, "ANA@example.com", "pending"),
    ];

    let plan = plan_sync(&profiles, &accounts);
    assert!(matches!(
        plan.actions[0].outcome,
        SyncOutcome::Synced { user_id, .. } if user_id == Uuid::from_u128(10)
    ));
}
