///! Tests for the conditional field policy.
///!
///! The policy is a pure function of (step, accumulated answers), so these
///! tests need no running server or database.
///!
///! Run with: `cargo test --test policy_test`
use uuid::Uuid;

use tracer_backend::models::graduates::{CivilStatus, College, Program, Sex, YesNo};
use tracer_backend::models::tracer::{
    Choice, EmploymentStatus, FirstJobDuration, MultiSelect, OtherMarker, SelectOne,
    UnemploymentReason, UnrelatedJobReason,
};
use tracer_backend::survey::draft::SurveyDraft;
use tracer_backend::survey::policy::{self, Section};

fn dept_id() -> Uuid {
    Uuid::from_u128(1)
}

fn others<E>() -> Choice<E> {
    Choice::Others(OtherMarker::Others)
}

fn fields(errors: &[policy::FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
}

/// Steps 1 and 2 complete, branch question unanswered.
fn base_draft() -> SurveyDraft {
    SurveyDraft {
        surname: Some("Reyes".to_string()),
        first_name: Some("Maria".to_string()),
        email: Some("maria.reyes@example.com".to_string()),
        phone: Some("09171234567".to_string()),
        permanent_address: Some("Quezon City".to_string()),
        sex: Some(Sex::Female),
        civil_status: Some(CivilStatus::Single),
        activity_images: vec!["act-1.jpg".to_string()],
        year_graduated: Some(2018),
        college_campus: Some(College::ComputingStudies),
        program: Some(Program::InformationTechnology),
        department_id: Some(dept_id()),
        course: Some("BS Information Technology".to_string()),
        ..SurveyDraft::default()
    }
}

fn employed_draft() -> SurveyDraft {
    SurveyDraft {
        ever_employed: Some(YesNo::Yes),
        company_name: Some("Acme Corp".to_string()),
        current_work: Some("Software developer".to_string()),
        employment_status: MultiSelect {
            selected: vec![Choice::Listed(EmploymentStatus::Regular)],
            other_text: None,
        },
        ..base_draft()
    }
}

fn unemployed_draft() -> SurveyDraft {
    SurveyDraft {
        ever_employed: Some(YesNo::No),
        unemployment_reasons: MultiSelect {
            selected: vec![Choice::Listed(UnemploymentReason::NoJobOpportunity)],
            other_text: None,
        },
        ..base_draft()
    }
}

#[test]
fn test_policy_is_pure_for_identical_input() {
    let draft = employed_draft();
    for step in 1..=5 {
        let first = policy::validate_step(step, &draft);
        let second = policy::validate_step(step, &draft);
        assert_eq!(first, second, "step {step} was not deterministic");
    }
    assert_eq!(
        policy::validate_submission(&draft),
        policy::validate_submission(&draft)
    );
}

#[test]
fn test_step_one_reports_every_missing_identity_field() {
    let errors = policy::validate_step(1, &SurveyDraft::default());
    let names = fields(&errors);

    for expected in [
        "surname",
        "first_name",
        "email",
        "phone",
        "permanent_address",
        "sex",
        "civil_status",
        "activity_images",
    ] {
        assert!(names.contains(&expected), "missing error for {expected}");
    }
}

#[test]
fn test_step_two_requires_education_fields() {
    let errors = policy::validate_step(2, &SurveyDraft::default());
    let names = fields(&errors);

    for expected in [
        "year_graduated",
        "college_campus",
        "program",
        "department_id",
        "course",
    ] {
        assert!(names.contains(&expected), "missing error for {expected}");
    }
}

#[test]
fn test_step_three_is_fully_optional() {
    assert!(policy::validate_step(3, &SurveyDraft::default()).is_empty());
}

#[test]
fn test_blank_strings_do_not_satisfy_required_fields() {
    let draft = SurveyDraft {
        surname: Some("   ".to_string()),
        ..base_draft()
    };
    assert!(fields(&policy::validate_step(1, &draft)).contains(&"surname"));
}

#[test]
fn test_others_selection_requires_companion_text() {
    let mut draft = unemployed_draft();
    draft.unemployment_reasons.selected.push(others());

    // No companion text at all.
    let errors = policy::validate_step(4, &draft);
    assert!(fields(&errors).contains(&"unemployment_reasons_other"));

    // Whitespace-only companion text is still blank.
    draft.unemployment_reasons.other_text = Some("   ".to_string());
    let errors = policy::validate_step(4, &draft);
    assert!(fields(&errors).contains(&"unemployment_reasons_other"));

    // Real text satisfies the rule.
    draft.unemployment_reasons.other_text = Some("waiting for a board exam".to_string());
    let errors = policy::validate_step(4, &draft);
    assert!(!fields(&errors).contains(&"unemployment_reasons_other"));
}

#[test]
fn test_companion_text_never_required_without_others() {
    let draft = unemployed_draft();
    let errors = policy::validate_step(4, &draft);
    assert!(!fields(&errors).contains(&"unemployment_reasons_other"));
}

#[test]
fn test_single_choice_others_requires_companion_text() {
    let mut draft = employed_draft();
    draft.first_job_duration = Some(SelectOne {
        choice: others::<FirstJobDuration>(),
        other_text: None,
    });

    let errors = policy::validate_step(5, &draft);
    assert!(fields(&errors).contains(&"first_job_duration_other"));

    draft.first_job_duration = Some(SelectOne {
        choice: Choice::Listed(FirstJobDuration::OneToSixMonths),
        other_text: None,
    });
    let errors = policy::validate_step(5, &draft);
    assert!(!fields(&errors).contains(&"first_job_duration_other"));
}

#[test]
fn test_never_employed_branch() {
    // Without reasons the branch demands at least one.
    let mut draft = unemployed_draft();
    draft.unemployment_reasons = MultiSelect::default();
    let errors = policy::validate_submission(&draft);
    assert!(fields(&errors).contains(&"unemployment_reasons"));

    // With a reason the whole submission validates, and nothing from the
    // employment side is demanded.
    let draft = unemployed_draft();
    let errors = policy::validate_submission(&draft);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn test_employed_branch() {
    let mut draft = employed_draft();
    draft.company_name = None;
    draft.current_work = None;

    let errors = policy::validate_submission(&draft);
    let names = fields(&errors);
    assert!(names.contains(&"company_name"));
    assert!(names.contains(&"current_work"));
    assert!(!names.contains(&"unemployment_reasons"));

    let errors = policy::validate_submission(&employed_draft());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn test_self_employment_requires_business_block() {
    let mut draft = employed_draft();
    draft
        .employment_status
        .selected
        .push(Choice::Listed(EmploymentStatus::SelfEmployed));

    let errors = policy::validate_step(4, &draft);
    let names = fields(&errors);
    assert!(names.contains(&"business_name"));
    assert!(names.contains(&"business_address"));
    assert!(names.contains(&"business_nature"));

    // Filling the block satisfies it.
    draft.business_name = Some("Reyes Sari-sari Store".to_string());
    draft.business_address = Some("Quezon City".to_string());
    draft.business_nature = Some("Retail".to_string());
    assert!(policy::validate_step(4, &draft).is_empty());

    // Without "Self-employed", none of the three are required.
    let errors = policy::validate_step(4, &employed_draft());
    let names = fields(&errors);
    assert!(!names.contains(&"business_name"));
    assert!(!names.contains(&"business_address"));
    assert!(!names.contains(&"business_nature"));
}

#[test]
fn test_unrelated_first_job_requires_reasons() {
    let mut draft = employed_draft();
    draft.first_job_related = Some(YesNo::No);

    let errors = policy::validate_step(5, &draft);
    assert!(fields(&errors).contains(&"unrelated_reasons"));

    draft.unrelated_reasons = MultiSelect {
        selected: vec![Choice::Listed(UnrelatedJobReason::SalariesAndBenefits)],
        other_text: None,
    };
    assert!(policy::validate_step(5, &draft).is_empty());

    // A related first job demands nothing.
    let mut draft = employed_draft();
    draft.first_job_related = Some(YesNo::Yes);
    assert!(policy::validate_step(5, &draft).is_empty());
}

#[test]
fn test_unemployed_short_circuits_step_five() {
    // Step 5 is an acknowledgement screen for never-employed respondents;
    // it must accept an empty answer set.
    assert!(policy::validate_step(5, &unemployed_draft()).is_empty());
}

#[test]
fn test_visible_sections_follow_the_branches() {
    let sections = policy::visible_sections(&base_draft());
    assert!(!sections.contains(&Section::Unemployment));
    assert!(!sections.contains(&Section::FirstJob));

    let sections = policy::visible_sections(&unemployed_draft());
    assert!(sections.contains(&Section::Unemployment));
    assert!(!sections.contains(&Section::FirstJob));
    assert!(!sections.contains(&Section::Salary));

    let mut draft = employed_draft();
    let sections = policy::visible_sections(&draft);
    assert!(sections.contains(&Section::FirstJob));
    assert!(sections.contains(&Section::Salary));
    assert!(!sections.contains(&Section::SelfEmployment));
    assert!(!sections.contains(&Section::Unemployment));

    draft
        .employment_status
        .selected
        .push(Choice::Listed(EmploymentStatus::SelfEmployed));
    assert!(policy::visible_sections(&draft).contains(&Section::SelfEmployment));
}
