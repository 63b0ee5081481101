///! Tests for the multi-step submission workflow.
///!
///! Drives the same state machine the HTTP handlers use, with no server or
///! database: submissions stop at the emitted payload.
///!
///! Run with: `cargo test --test workflow_test`
use uuid::Uuid;

use tracer_backend::catalog::DepartmentIndex;
use tracer_backend::models::graduates::{CivilStatus, College, Program, Sex, YesNo};
use tracer_backend::models::tracer::{
    Choice, EmploymentHistory, EmploymentStatus, MultiSelect, UnemploymentReason,
};
use tracer_backend::survey::draft::DraftUpdate;
use tracer_backend::survey::workflow::{SurveyWorkflow, WorkflowError, WorkflowPhase};

fn dept_id() -> Uuid {
    Uuid::from_u128(7)
}

fn departments() -> DepartmentIndex {
    DepartmentIndex::from_ids([dept_id()])
}

/// Every answer an employed respondent needs to submit.
fn full_update() -> DraftUpdate {
    DraftUpdate {
        surname: Some("Santos".to_string()),
        first_name: Some("Jose".to_string()),
        email: Some("jose.santos@example.com".to_string()),
        phone: Some("09179876543".to_string()),
        permanent_address: Some("Davao City".to_string()),
        sex: Some(Sex::Male),
        civil_status: Some(CivilStatus::Married),
        activity_images: Some(vec!["act-1.jpg".to_string(), "act-2.jpg".to_string()]),
        year_graduated: Some(2015),
        college_campus: Some(College::Engineering),
        program: Some(Program::CivilEngineering),
        department_id: Some(dept_id()),
        course: Some("BS Civil Engineering".to_string()),
        ever_employed: Some(YesNo::Yes),
        company_name: Some("Batangas Builders".to_string()),
        current_work: Some("Site engineer".to_string()),
        employment_status: Some(MultiSelect {
            selected: vec![Choice::Listed(EmploymentStatus::Regular)],
            other_text: None,
        }),
        ..DraftUpdate::default()
    }
}

fn workflow_at_last_step() -> SurveyWorkflow {
    let mut workflow = SurveyWorkflow::new();
    workflow.apply(full_update()).unwrap();
    for _ in 0..4 {
        workflow.advance().unwrap();
    }
    assert_eq!(workflow.step(), 5);
    workflow
}

#[test]
fn test_advance_is_refused_without_required_answers() {
    let mut workflow = SurveyWorkflow::new();

    let err = workflow.advance().unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    // Refusal leaves the step unchanged and keeps the errors visible.
    assert_eq!(workflow.step(), 1);
    assert!(!workflow.last_errors().is_empty());
}

#[test]
fn test_advance_stops_at_the_last_step() {
    let mut workflow = workflow_at_last_step();
    assert_eq!(workflow.advance().unwrap(), 5);
}

#[test]
fn test_retreat_preserves_accumulated_answers() {
    let mut workflow = SurveyWorkflow::new();
    workflow.apply(full_update()).unwrap();
    workflow.advance().unwrap();
    workflow.advance().unwrap();
    assert_eq!(workflow.step(), 3);
    let before = workflow.draft().clone();

    workflow.retreat().unwrap();
    assert_eq!(workflow.step(), 2);
    workflow.advance().unwrap();
    assert_eq!(workflow.step(), 3);

    // Back-and-forth navigation with no edits changes nothing.
    assert_eq!(workflow.draft(), &before);
}

#[test]
fn test_retreat_is_refused_at_the_first_step() {
    let mut workflow = SurveyWorkflow::new();
    assert!(matches!(
        workflow.retreat(),
        Err(WorkflowError::Conflict(_))
    ));
}

#[test]
fn test_submit_is_only_allowed_at_the_last_step() {
    let mut workflow = SurveyWorkflow::new();
    workflow.apply(full_update()).unwrap();
    assert!(matches!(
        workflow.submit(&departments()),
        Err(WorkflowError::Conflict(_))
    ));
}

#[test]
fn test_submit_accepts_a_complete_draft() {
    let mut workflow = workflow_at_last_step();
    let payload = workflow.submit(&departments()).unwrap();

    assert_eq!(payload.surname, "Santos");
    assert_eq!(payload.email, "jose.santos@example.com");
    assert!(matches!(payload.history, EmploymentHistory::Employed(_)));
    assert_eq!(workflow.phase(), WorkflowPhase::Submitted);
}

#[test]
fn test_double_submit_is_a_conflict() {
    let mut workflow = workflow_at_last_step();
    workflow.submit(&departments()).unwrap();

    // A retry must be rejected, never re-processed.
    assert!(matches!(
        workflow.submit(&departments()),
        Err(WorkflowError::Conflict(_))
    ));
    // Late edits are rejected too.
    assert!(matches!(
        workflow.apply(DraftUpdate::default()),
        Err(WorkflowError::Conflict(_))
    ));
}

#[test]
fn test_reopen_after_failed_persistence_allows_resubmission() {
    let mut workflow = workflow_at_last_step();
    workflow.submit(&departments()).unwrap();

    workflow.reopen();
    assert_eq!(workflow.phase(), WorkflowPhase::InProgress);
    assert!(workflow.submit(&departments()).is_ok());
}

#[test]
fn test_sixth_activity_image_is_rejected_at_submission() {
    let mut workflow = SurveyWorkflow::new();
    let mut update = full_update();
    update.activity_images = Some((1..=6).map(|i| format!("act-{i}.jpg")).collect());
    workflow.apply(update).unwrap();
    for _ in 0..4 {
        workflow.advance().unwrap();
    }

    let err = workflow.submit(&departments()).unwrap_err();
    let WorkflowError::Validation(errors) = err else {
        panic!("expected a validation refusal");
    };
    assert!(errors.iter().any(|e| e.field == "activity_images"));
    assert_eq!(workflow.phase(), WorkflowPhase::InProgress);
}

#[test]
fn test_exactly_five_activity_images_are_accepted() {
    let mut workflow = SurveyWorkflow::new();
    let mut update = full_update();
    update.activity_images = Some((1..=5).map(|i| format!("act-{i}.jpg")).collect());
    workflow.apply(update).unwrap();
    for _ in 0..4 {
        workflow.advance().unwrap();
    }

    let payload = workflow.submit(&departments()).unwrap();
    assert_eq!(payload.activity_images.len(), 5);
}

#[test]
fn test_zero_activity_images_block_the_first_step() {
    let mut workflow = SurveyWorkflow::new();
    let mut update = full_update();
    update.activity_images = Some(Vec::new());
    workflow.apply(update).unwrap();

    let err = workflow.advance().unwrap_err();
    let WorkflowError::Validation(errors) = err else {
        panic!("expected a validation refusal");
    };
    assert!(errors.iter().any(|e| e.field == "activity_images"));
}

#[test]
fn test_submission_revalidates_branch_rules_across_steps() {
    // The respondent reaches step 5 with a valid draft, then flips to
    // self-employed with a blank business name. Submission must re-check
    // the step-4 branch and refuse.
    let mut workflow = workflow_at_last_step();
    workflow
        .apply(DraftUpdate {
            employment_status: Some(MultiSelect {
                selected: vec![Choice::Listed(EmploymentStatus::SelfEmployed)],
                other_text: None,
            }),
            business_name: Some("".to_string()),
            ..DraftUpdate::default()
        })
        .unwrap();

    let err = workflow.submit(&departments()).unwrap_err();
    let WorkflowError::Validation(errors) = err else {
        panic!("expected a validation refusal");
    };
    assert!(errors.iter().any(|e| e.field == "business_name"));
    assert_eq!(workflow.phase(), WorkflowPhase::InProgress);

    // Correcting the field makes the same submission succeed.
    workflow
        .apply(DraftUpdate {
            business_name: Some("Santos Construction Supply".to_string()),
            business_address: Some("Davao City".to_string()),
            business_nature: Some("Construction supplies".to_string()),
            ..DraftUpdate::default()
        })
        .unwrap();
    let payload = workflow.submit(&departments()).unwrap();

    let EmploymentHistory::Employed(record) = payload.history else {
        panic!("expected an employed history");
    };
    let business = record.business.expect("business block should be kept");
    assert_eq!(business.name, "Santos Construction Supply");
}

#[test]
fn test_switching_to_never_employed_drops_the_employment_block() {
    let mut workflow = workflow_at_last_step();
    workflow
        .apply(DraftUpdate {
            ever_employed: Some(YesNo::No),
            unemployment_reasons: Some(MultiSelect {
                selected: vec![Choice::Listed(UnemploymentReason::FurtherStudy)],
                other_text: None,
            }),
            ..DraftUpdate::default()
        })
        .unwrap();

    let payload = workflow.submit(&departments()).unwrap();
    // Company answers entered before the flip never reach the payload.
    let EmploymentHistory::NeverEmployed(record) = payload.history else {
        panic!("expected a never-employed history");
    };
    assert!(!record.reasons.is_empty());
}

#[test]
fn test_unknown_department_is_rejected() {
    let mut workflow = workflow_at_last_step();

    let err = workflow
        .submit(&DepartmentIndex::from_ids([Uuid::from_u128(99)]))
        .unwrap_err();
    let WorkflowError::Validation(errors) = err else {
        panic!("expected a validation refusal");
    };
    assert!(errors.iter().any(|e| e.field == "department_id"));
}

#[test]
fn test_too_many_training_titles_are_rejected() {
    let mut workflow = SurveyWorkflow::new();
    let mut update = full_update();
    update.trainings = Some(
        ["a", "b", "c", "d"]
            .iter()
            .map(|t| format!("{t} training"))
            .collect(),
    );
    workflow.apply(update).unwrap();
    for _ in 0..4 {
        workflow.advance().unwrap();
    }

    let err = workflow.submit(&departments()).unwrap_err();
    let WorkflowError::Validation(errors) = err else {
        panic!("expected a validation refusal");
    };
    assert!(errors.iter().any(|e| e.field == "trainings"));
}

#[test]
fn test_abandon_discards_everything() {
    let mut workflow = SurveyWorkflow::new();
    workflow.apply(full_update()).unwrap();
    workflow.advance().unwrap();

    workflow.abandon().unwrap();
    assert_eq!(workflow.phase(), WorkflowPhase::Abandoned);
    assert!(workflow.draft().surname.is_none());
    assert!(workflow.draft().activity_images.is_empty());

    // An abandoned survey accepts nothing further.
    assert!(matches!(
        workflow.apply(DraftUpdate::default()),
        Err(WorkflowError::Conflict(_))
    ));
    assert!(matches!(workflow.abandon(), Err(WorkflowError::Conflict(_))));
}

#[test]
fn test_one_shot_registration_enforces_the_same_rules() {
    // The admin path funnels a full answer set through run_to_submission;
    // a missing branch answer fails exactly like the step-by-step flow.
    let mut workflow = SurveyWorkflow::new();
    let mut update = full_update();
    update.company_name = None;
    update.current_work = None;
    workflow.apply(update).unwrap();

    // company/current_work answers are collected at step 4, so the
    // fast-forward stops there.
    let err = workflow.run_to_submission(&departments()).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(workflow.step(), 4);

    let mut workflow = SurveyWorkflow::new();
    workflow.apply(full_update()).unwrap();
    let payload = workflow.run_to_submission(&departments()).unwrap();
    assert_eq!(payload.surname, "Santos");
}
