//! Conditional field policy for the tracer survey.
//!
//! A pure function of (step, accumulated answers): which sections currently
//! apply and which fields the current answers make required. It never
//! panics and has no side effects; callers surface the returned batch of
//! field errors as a whole so the form can show every problem at once.

use serde::Serialize;

use crate::models::graduates::YesNo;
use crate::models::tracer::{MultiSelect, SelectOne};
use crate::survey::draft::SurveyDraft;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 5;

/// One violated requirement, named after the draft field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "this field is required")
    }
}

/// Survey sections whose visibility depends on prior answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Identity,
    Education,
    FurtherStudies,
    Employment,
    SelfEmployment,
    Unemployment,
    FirstJob,
    Salary,
}

/// The sections that currently apply, given the accumulated answers.
pub fn visible_sections(draft: &SurveyDraft) -> Vec<Section> {
    let mut sections = vec![
        Section::Identity,
        Section::Education,
        Section::FurtherStudies,
        Section::Employment,
    ];
    match draft.ever_employed {
        Some(YesNo::Yes) => {
            if draft.is_self_employed() {
                sections.push(Section::SelfEmployment);
            }
            sections.push(Section::FirstJob);
            sections.push(Section::Salary);
        }
        Some(YesNo::No) => sections.push(Section::Unemployment),
        None => {}
    }
    sections
}

/// Validate one step of the survey against the accumulated answers.
///
/// Unknown step indices validate empty rather than erroring; the workflow
/// never produces them, and the policy never throws.
pub fn validate_step(step: u8, draft: &SurveyDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    match step {
        1 => {
            require_text(&mut errors, "surname", &draft.surname);
            require_text(&mut errors, "first_name", &draft.first_name);
            require_text(&mut errors, "email", &draft.email);
            require_text(&mut errors, "phone", &draft.phone);
            require_text(&mut errors, "permanent_address", &draft.permanent_address);
            if draft.sex.is_none() {
                errors.push(FieldError::missing("sex"));
            }
            if draft.civil_status.is_none() {
                errors.push(FieldError::missing("civil_status"));
            }
            if draft.activity_images.is_empty() {
                errors.push(FieldError::new(
                    "activity_images",
                    "at least one activity image is required",
                ));
            }
        }
        2 => {
            if draft.year_graduated.is_none() {
                errors.push(FieldError::missing("year_graduated"));
            }
            if draft.college_campus.is_none() {
                errors.push(FieldError::missing("college_campus"));
            }
            if draft.program.is_none() {
                errors.push(FieldError::missing("program"));
            }
            if draft.department_id.is_none() {
                errors.push(FieldError::missing("department_id"));
            }
            require_text(&mut errors, "course", &draft.course);
        }
        3 => {
            // Advanced study, exams and trainings are optional; only the
            // "Others" companion rule applies.
            if let Some(study) = &draft.advanced_study {
                check_multi(&mut errors, "advanced_study_reasons", &study.reasons, false);
            }
        }
        4 => match &draft.ever_employed {
            None => errors.push(FieldError::missing("ever_employed")),
            Some(YesNo::Yes) => {
                require_text(&mut errors, "company_name", &draft.company_name);
                require_text(&mut errors, "current_work", &draft.current_work);
                check_multi(&mut errors, "employment_status", &draft.employment_status, false);
                check_multi(&mut errors, "recent_positions", &draft.recent_positions, false);
                if draft.is_self_employed() {
                    require_text(&mut errors, "business_name", &draft.business_name);
                    require_text(&mut errors, "business_address", &draft.business_address);
                    require_text(&mut errors, "business_nature", &draft.business_nature);
                }
            }
            Some(YesNo::No) => {
                check_multi(
                    &mut errors,
                    "unemployment_reasons",
                    &draft.unemployment_reasons,
                    true,
                );
            }
        },
        5 => {
            // Respondents who were never employed see an acknowledgement
            // screen here; nothing is required of them.
            if matches!(draft.ever_employed, Some(YesNo::Yes)) {
                check_multi(&mut errors, "staying_reasons", &draft.staying_reasons, false);
                if matches!(draft.first_job_related, Some(YesNo::No)) {
                    check_multi(&mut errors, "unrelated_reasons", &draft.unrelated_reasons, true);
                } else {
                    check_multi(&mut errors, "unrelated_reasons", &draft.unrelated_reasons, false);
                }
                check_multi(&mut errors, "change_reasons", &draft.change_reasons, false);
                check_choice(&mut errors, "first_job_duration", &draft.first_job_duration);
                check_choice(&mut errors, "how_found_first_job", &draft.how_found_first_job);
                check_choice(&mut errors, "time_to_land", &draft.time_to_land);
            }
        }
        _ => {}
    }
    errors
}

/// Validate every step, for final submission.
///
/// Branch answers given late (step 4) retroactively change what earlier and
/// later steps require, so submission always re-checks the whole draft.
pub fn validate_submission(draft: &SurveyDraft) -> Vec<FieldError> {
    (FIRST_STEP..=LAST_STEP)
        .flat_map(|step| validate_step(step, draft))
        .collect()
}

fn require_text(errors: &mut Vec<FieldError>, field: &str, value: &Option<String>) {
    let blank = value.as_deref().map(str::trim).unwrap_or("").is_empty();
    if blank {
        errors.push(FieldError::missing(field));
    }
}

/// The shared multi-select rule: optionally demand at least one selection,
/// and always demand the companion text when "Others" is selected.
fn check_multi<E: PartialEq>(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &MultiSelect<E>,
    required: bool,
) {
    if required && value.is_empty() {
        errors.push(FieldError::new(field, "select at least one option"));
    }
    if value.has_others() && value.other_text_trimmed().is_none() {
        errors.push(FieldError::new(
            format!("{field}_other"),
            "describe the \"Others\" option you selected",
        ));
    }
}

fn check_choice<E>(errors: &mut Vec<FieldError>, field: &str, value: &Option<SelectOne<E>>) {
    if let Some(selected) = value {
        if selected.has_others() && selected.other_text_trimmed().is_none() {
            errors.push(FieldError::new(
                format!("{field}_other"),
                "describe the \"Others\" option you selected",
            ));
        }
    }
}
