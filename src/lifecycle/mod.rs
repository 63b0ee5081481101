//! Approval lifecycle of a graduate profile, and the one-way status
//! reconciliation onto user accounts.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::graduates as graduate_db;
use crate::db::users as user_db;
use crate::models::graduates::{self, GraduateStatus};
use crate::models::users;

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("cannot move a {from} record to {to}")]
    NotAllowed {
        from: GraduateStatus,
        to: GraduateStatus,
    },
}

/// The allowed status edges. Approved and rejected are never directly
/// interchangeable; a reversal passes back through pending.
pub fn can_transition(from: &GraduateStatus, to: &GraduateStatus) -> bool {
    use GraduateStatus::*;
    matches!(
        (from, to),
        (Pending, Approved) | (Pending, Rejected) | (Approved, Pending) | (Rejected, Pending)
    )
}

pub fn check_transition(from: &GraduateStatus, to: &GraduateStatus) -> Result<(), TransitionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

// ── Status reconciliation ──

/// The status-bearing slice of a graduate profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStatus {
    pub id: Uuid,
    pub email: Option<String>,
    pub status: GraduateStatus,
}

impl From<&graduates::Model> for ProfileStatus {
    fn from(m: &graduates::Model) -> Self {
        Self {
            id: m.id,
            email: m.email.clone(),
            status: m.status.clone(),
        }
    }
}

/// The status-bearing slice of a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatus {
    pub id: Uuid,
    pub email: String,
    pub status: String,
}

impl From<&users::Model> for AccountStatus {
    fn from(m: &users::Model) -> Self {
        Self {
            id: m.id,
            email: m.email.clone(),
            status: m.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The account's status differs and will be overwritten.
    Synced {
        user_id: Uuid,
        status: GraduateStatus,
    },
    /// The account already carries the profile's status; no write, no
    /// spurious audit event.
    AlreadyInSync { user_id: Uuid },
    /// No account matches the profile's email. A normal, counted outcome.
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub processed: usize,
    pub synced: usize,
    pub already_in_sync: usize,
    pub not_found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncAction {
    pub profile_id: Uuid,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub actions: Vec<SyncAction>,
    pub summary: SyncSummary,
}

/// Emails are compared trimmed and case-insensitively.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Decide, without touching storage, what reconciliation would do.
///
/// Pure and order-preserving: a profile with no matching account is counted
/// and skipped, never an error, so one absence cannot abort the batch.
/// Re-planning over already-synced data yields only `AlreadyInSync`.
pub fn plan_sync(profiles: &[ProfileStatus], accounts: &[AccountStatus]) -> SyncPlan {
    let mut by_email: HashMap<String, &AccountStatus> = HashMap::new();
    for account in accounts {
        // First match wins when duplicate emails slip in.
        by_email.entry(normalize_email(&account.email)).or_insert(account);
    }

    let mut plan = SyncPlan::default();
    for profile in profiles {
        let Some(email) = &profile.email else {
            continue;
        };
        plan.summary.processed += 1;
        let outcome = match by_email.get(&normalize_email(email)) {
            None => {
                plan.summary.not_found += 1;
                SyncOutcome::NotFound
            }
            Some(account) if account.status == profile.status.as_str() => {
                plan.summary.already_in_sync += 1;
                SyncOutcome::AlreadyInSync {
                    user_id: account.id,
                }
            }
            Some(account) => {
                plan.summary.synced += 1;
                SyncOutcome::Synced {
                    user_id: account.id,
                    status: profile.status.clone(),
                }
            }
        };
        plan.actions.push(SyncAction {
            profile_id: profile.id,
            outcome,
        });
    }
    plan
}

/// Load every profile with an email and every account, plan, and apply.
///
/// Each write is an idempotent overwrite of one scalar field, so the
/// operation is safe to re-run or to overlap with itself; the profile is
/// always the source of truth.
pub async fn run_sync(db: &DatabaseConnection) -> Result<SyncSummary, DbErr> {
    let profiles: Vec<ProfileStatus> = graduate_db::get_profiles_with_email(db)
        .await?
        .iter()
        .map(ProfileStatus::from)
        .collect();
    let accounts: Vec<AccountStatus> = user_db::get_all_accounts(db)
        .await?
        .iter()
        .map(AccountStatus::from)
        .collect();

    let plan = plan_sync(&profiles, &accounts);
    for action in &plan.actions {
        if let SyncOutcome::Synced { user_id, status } = &action.outcome {
            user_db::update_account_status(db, *user_id, status.as_str()).await?;
        }
    }

    tracing::info!(
        "Status sync: {} processed, {} synced, {} already in sync, {} without a matching account",
        plan.summary.processed,
        plan.summary.synced,
        plan.summary.already_in_sync,
        plan.summary.not_found
    );
    Ok(plan.summary)
}
