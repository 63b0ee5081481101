//! The multi-step submission workflow: a finite-state sequencer over the
//! five survey steps, ending in `submitted` or `abandoned`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::DepartmentIndex;
use crate::survey::draft::{DraftUpdate, SubmissionPayload, SurveyDraft};
use crate::survey::policy::{self, FIRST_STEP, FieldError, LAST_STEP};
use crate::survey::schema;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Conflict(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    InProgress,
    Submitted,
    Abandoned,
}

/// One respondent's in-progress survey.
///
/// Answers accumulate across steps and survive back/forward navigation;
/// nothing is persisted until [`SurveyWorkflow::submit`] accepts the whole
/// draft and emits a payload.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyWorkflow {
    id: Uuid,
    step: u8,
    phase: WorkflowPhase,
    draft: SurveyDraft,
    last_errors: Vec<FieldError>,
    created_at: DateTime<Utc>,
}

impl SurveyWorkflow {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: FIRST_STEP,
            phase: WorkflowPhase::InProgress,
            draft: SurveyDraft::default(),
            last_errors: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    pub fn last_errors(&self) -> &[FieldError] {
        &self.last_errors
    }

    fn ensure_active(&self) -> Result<(), WorkflowError> {
        match self.phase {
            WorkflowPhase::InProgress => Ok(()),
            WorkflowPhase::Submitted => Err(WorkflowError::Conflict(
                "this survey has already been submitted".to_string(),
            )),
            WorkflowPhase::Abandoned => Err(WorkflowError::Conflict(
                "this survey has been abandoned".to_string(),
            )),
        }
    }

    /// Merge a partial answer patch into the draft.
    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        update.apply_to(&mut self.draft);
        Ok(())
    }

    pub fn set_profile_picture(&mut self, path: String) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        self.draft.profile_picture = Some(path);
        Ok(())
    }

    pub fn add_activity_image(&mut self, path: String) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        self.draft.activity_images.push(path);
        Ok(())
    }

    /// Validate the current step and move forward. A refused transition
    /// returns the full error batch and leaves the step unchanged.
    pub fn advance(&mut self) -> Result<u8, WorkflowError> {
        self.ensure_active()?;
        let errors = policy::validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            self.last_errors = errors.clone();
            return Err(WorkflowError::Validation(errors));
        }
        self.last_errors.clear();
        if self.step < LAST_STEP {
            self.step += 1;
        }
        Ok(self.step)
    }

    /// Step back. Answers entered on steps already visited are kept.
    pub fn retreat(&mut self) -> Result<u8, WorkflowError> {
        self.ensure_active()?;
        if self.step <= FIRST_STEP {
            return Err(WorkflowError::Conflict(
                "already at the first step".to_string(),
            ));
        }
        self.step -= 1;
        Ok(self.step)
    }

    /// Accept the whole draft and seal the workflow.
    ///
    /// Re-validates every step plus the structural invariants, because
    /// branch decisions made in step 4 retroactively change what the other
    /// steps require. Only allowed at the final step, and only once.
    pub fn submit(
        &mut self,
        departments: &DepartmentIndex,
    ) -> Result<SubmissionPayload, WorkflowError> {
        self.ensure_active()?;
        if self.step != LAST_STEP {
            return Err(WorkflowError::Conflict(format!(
                "submission is only allowed at step {LAST_STEP}"
            )));
        }
        let mut errors = schema::validate_structural(&self.draft, departments);
        errors.extend(policy::validate_submission(&self.draft));
        if !errors.is_empty() {
            self.last_errors = errors.clone();
            return Err(WorkflowError::Validation(errors));
        }
        let payload = match self.draft.finalize() {
            Ok(payload) => payload,
            Err(errors) => {
                self.last_errors = errors.clone();
                return Err(WorkflowError::Validation(errors));
            }
        };
        self.last_errors.clear();
        self.phase = WorkflowPhase::Submitted;
        Ok(payload)
    }

    /// Put an accepted submission back in progress because persisting it
    /// failed. Keeps the no-partial-record guarantee without stranding the
    /// respondent on a dead session.
    pub fn reopen(&mut self) {
        if self.phase == WorkflowPhase::Submitted {
            self.phase = WorkflowPhase::InProgress;
        }
    }

    /// Discard all accumulated answers and attachments. Nothing of an
    /// abandoned survey is ever persisted.
    pub fn abandon(&mut self) -> Result<(), WorkflowError> {
        self.ensure_active()?;
        self.draft = SurveyDraft::default();
        self.last_errors.clear();
        self.phase = WorkflowPhase::Abandoned;
        Ok(())
    }

    /// Drive a fully-populated draft through every step and submit it.
    ///
    /// The admin registration path uses this so both registration flows
    /// enforce exactly the same step rules.
    pub fn run_to_submission(
        &mut self,
        departments: &DepartmentIndex,
    ) -> Result<SubmissionPayload, WorkflowError> {
        self.ensure_active()?;
        while self.step < LAST_STEP {
            self.advance()?;
        }
        self.submit(departments)
    }
}

impl Default for SurveyWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
