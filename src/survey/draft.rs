use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::graduates::{CivilStatus, College, Major, Program, Sex, YesNo};
use crate::models::tracer::{
    AdvancedStudy, BusinessDetails, EarningBracket, EmploymentHistory, EmploymentRecord,
    EmploymentStatus, FirstJobDuration, FirstJobRecord, JobChangeReason, JobLandingTime,
    JobSearchMethod, MultiSelect, ProfessionalExam, RecentPosition, SelectOne, StayingReason,
    UnemploymentReason, UnemploymentRecord, UnrelatedJobReason,
};
use crate::survey::policy::FieldError;

/// The accumulated answers of an in-progress tracer survey.
///
/// Deliberately flat and fully optional: it mirrors the form while the
/// respondent is still moving between steps. [`SurveyDraft::finalize`] turns
/// it into the typed [`SubmissionPayload`] in which fields that do not apply
/// cannot be represented at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyDraft {
    // Step 1 — identity
    pub surname: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub permanent_address: Option<String>,
    pub sex: Option<Sex>,
    pub civil_status: Option<CivilStatus>,
    pub profile_picture: Option<String>,
    pub activity_images: Vec<String>,

    // Step 2 — education
    pub year_graduated: Option<i32>,
    pub college_campus: Option<College>,
    pub program: Option<Program>,
    pub major: Option<Major>,
    pub department_id: Option<Uuid>,
    pub course: Option<String>,

    // Step 3 — advanced study, exams, trainings (all optional)
    pub advanced_study: Option<AdvancedStudy>,
    pub professional_exam: Option<ProfessionalExam>,
    pub trainings: Vec<String>,

    // Step 4 — employment root and its branches
    pub ever_employed: Option<YesNo>,
    pub company_name: Option<String>,
    pub company_nature: Option<String>,
    pub company_email: Option<String>,
    pub company_contact: Option<String>,
    pub company_address: Option<String>,
    pub employment_status: MultiSelect<EmploymentStatus>,
    pub recent_positions: MultiSelect<RecentPosition>,
    pub current_work: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_nature: Option<String>,
    pub unemployment_reasons: MultiSelect<UnemploymentReason>,

    // Step 5 — first job, staying reasons, salary (employed respondents only)
    pub staying_reasons: MultiSelect<StayingReason>,
    pub first_job_related: Option<YesNo>,
    pub unrelated_reasons: MultiSelect<UnrelatedJobReason>,
    pub change_reasons: MultiSelect<JobChangeReason>,
    pub first_job_duration: Option<SelectOne<FirstJobDuration>>,
    pub how_found_first_job: Option<SelectOne<JobSearchMethod>>,
    pub time_to_land: Option<SelectOne<JobLandingTime>>,
    pub initial_earning: Option<EarningBracket>,
    pub recent_earning: Option<EarningBracket>,
}

impl SurveyDraft {
    pub fn is_self_employed(&self) -> bool {
        self.employment_status.contains(&EmploymentStatus::SelfEmployed)
    }

    fn first_job_record(&self) -> Option<FirstJobRecord> {
        let untouched = self.first_job_related.is_none()
            && self.unrelated_reasons.is_empty()
            && self.change_reasons.is_empty()
            && self.first_job_duration.is_none()
            && self.how_found_first_job.is_none()
            && self.time_to_land.is_none();
        if untouched {
            return None;
        }
        Some(FirstJobRecord {
            related_to_course: self.first_job_related.clone(),
            unrelated_reasons: self.unrelated_reasons.clone(),
            change_reasons: self.change_reasons.clone(),
            duration: self.first_job_duration.clone(),
            how_found: self.how_found_first_job.clone(),
            time_to_land: self.time_to_land.clone(),
        })
    }

    /// Seal the draft into an immutable submission payload.
    ///
    /// Expects the draft to have passed policy and structural validation;
    /// anything still missing comes back as field errors rather than a
    /// panic. Sections hidden by branch answers are dropped here, so values
    /// that no longer apply never reach persistence.
    pub fn finalize(&self) -> Result<SubmissionPayload, Vec<FieldError>> {
        let (
            Some(surname),
            Some(first_name),
            Some(email),
            Some(phone),
            Some(permanent_address),
            Some(course),
        ) = (
            nonblank(&self.surname),
            nonblank(&self.first_name),
            nonblank(&self.email),
            nonblank(&self.phone),
            nonblank(&self.permanent_address),
            nonblank(&self.course),
        )
        else {
            return Err(incomplete());
        };

        let (
            Some(sex),
            Some(civil_status),
            Some(year_graduated),
            Some(college_campus),
            Some(program),
            Some(department_id),
            Some(ever_employed),
        ) = (
            self.sex.clone(),
            self.civil_status.clone(),
            self.year_graduated,
            self.college_campus.clone(),
            self.program.clone(),
            self.department_id,
            self.ever_employed.clone(),
        )
        else {
            return Err(incomplete());
        };

        let history = match ever_employed {
            YesNo::Yes => {
                let (Some(company_name), Some(current_work)) =
                    (nonblank(&self.company_name), nonblank(&self.current_work))
                else {
                    return Err(incomplete());
                };
                let business = if self.is_self_employed() {
                    let (Some(name), Some(address), Some(nature)) = (
                        nonblank(&self.business_name),
                        nonblank(&self.business_address),
                        nonblank(&self.business_nature),
                    ) else {
                        return Err(incomplete());
                    };
                    Some(BusinessDetails {
                        name,
                        address,
                        nature,
                    })
                } else {
                    None
                };
                EmploymentHistory::Employed(EmploymentRecord {
                    company_name,
                    company_nature: nonblank(&self.company_nature),
                    company_email: nonblank(&self.company_email),
                    company_contact: nonblank(&self.company_contact),
                    company_address: nonblank(&self.company_address),
                    employment_status: self.employment_status.clone(),
                    recent_positions: self.recent_positions.clone(),
                    current_work,
                    business,
                    first_job: self.first_job_record(),
                    staying_reasons: self.staying_reasons.clone(),
                    initial_earning: self.initial_earning,
                    recent_earning: self.recent_earning,
                })
            }
            YesNo::No => EmploymentHistory::NeverEmployed(UnemploymentRecord {
                reasons: self.unemployment_reasons.clone(),
            }),
        };

        Ok(SubmissionPayload {
            surname,
            first_name,
            middle_name: nonblank(&self.middle_name),
            email,
            phone,
            permanent_address,
            sex,
            civil_status,
            year_graduated,
            college_campus,
            program,
            major: self.major.clone(),
            department_id,
            course,
            advanced_study: self.advanced_study.clone(),
            professional_exam: self.professional_exam.clone(),
            trainings: self
                .trainings
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            history,
            profile_picture: nonblank(&self.profile_picture),
            activity_images: self.activity_images.clone(),
        })
    }
}

fn nonblank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn incomplete() -> Vec<FieldError> {
    vec![FieldError::new(
        "submission",
        "required answers are incomplete",
    )]
}

/// A partial answer patch: only the fields present in the request body
/// overwrite the draft, so back-and-forth navigation never loses answers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftUpdate {
    pub surname: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub permanent_address: Option<String>,
    pub sex: Option<Sex>,
    pub civil_status: Option<CivilStatus>,
    pub profile_picture: Option<String>,
    pub activity_images: Option<Vec<String>>,
    pub year_graduated: Option<i32>,
    pub college_campus: Option<College>,
    pub program: Option<Program>,
    pub major: Option<Major>,
    pub department_id: Option<Uuid>,
    pub course: Option<String>,
    pub advanced_study: Option<AdvancedStudy>,
    pub professional_exam: Option<ProfessionalExam>,
    pub trainings: Option<Vec<String>>,
    pub ever_employed: Option<YesNo>,
    pub company_name: Option<String>,
    pub company_nature: Option<String>,
    pub company_email: Option<String>,
    pub company_contact: Option<String>,
    pub company_address: Option<String>,
    pub employment_status: Option<MultiSelect<EmploymentStatus>>,
    pub recent_positions: Option<MultiSelect<RecentPosition>>,
    pub current_work: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_nature: Option<String>,
    pub unemployment_reasons: Option<MultiSelect<UnemploymentReason>>,
    pub staying_reasons: Option<MultiSelect<StayingReason>>,
    pub first_job_related: Option<YesNo>,
    pub unrelated_reasons: Option<MultiSelect<UnrelatedJobReason>>,
    pub change_reasons: Option<MultiSelect<JobChangeReason>>,
    pub first_job_duration: Option<SelectOne<FirstJobDuration>>,
    pub how_found_first_job: Option<SelectOne<JobSearchMethod>>,
    pub time_to_land: Option<SelectOne<JobLandingTime>>,
    pub initial_earning: Option<EarningBracket>,
    pub recent_earning: Option<EarningBracket>,
}

impl DraftUpdate {
    pub fn apply_to(self, draft: &mut SurveyDraft) {
        if let Some(v) = self.surname {
            draft.surname = Some(v);
        }
        if let Some(v) = self.first_name {
            draft.first_name = Some(v);
        }
        if let Some(v) = self.middle_name {
            draft.middle_name = Some(v);
        }
        if let Some(v) = self.email {
            draft.email = Some(v);
        }
        if let Some(v) = self.phone {
            draft.phone = Some(v);
        }
        if let Some(v) = self.permanent_address {
            draft.permanent_address = Some(v);
        }
        if let Some(v) = self.sex {
            draft.sex = Some(v);
        }
        if let Some(v) = self.civil_status {
            draft.civil_status = Some(v);
        }
        if let Some(v) = self.profile_picture {
            draft.profile_picture = Some(v);
        }
        if let Some(v) = self.activity_images {
            draft.activity_images = v;
        }
        if let Some(v) = self.year_graduated {
            draft.year_graduated = Some(v);
        }
        if let Some(v) = self.college_campus {
            draft.college_campus = Some(v);
        }
        if let Some(v) = self.program {
            draft.program = Some(v);
        }
        if let Some(v) = self.major {
            draft.major = Some(v);
        }
        if let Some(v) = self.department_id {
            draft.department_id = Some(v);
        }
        if let Some(v) = self.course {
            draft.course = Some(v);
        }
        if let Some(v) = self.advanced_study {
            draft.advanced_study = Some(v);
        }
        if let Some(v) = self.professional_exam {
            draft.professional_exam = Some(v);
        }
        if let Some(v) = self.trainings {
            draft.trainings = v;
        }
        if let Some(v) = self.ever_employed {
            draft.ever_employed = Some(v);
        }
        if let Some(v) = self.company_name {
            draft.company_name = Some(v);
        }
        if let Some(v) = self.company_nature {
            draft.company_nature = Some(v);
        }
        if let Some(v) = self.company_email {
            draft.company_email = Some(v);
        }
        if let Some(v) = self.company_contact {
            draft.company_contact = Some(v);
        }
        if let Some(v) = self.company_address {
            draft.company_address = Some(v);
        }
        if let Some(v) = self.employment_status {
            draft.employment_status = v;
        }
        if let Some(v) = self.recent_positions {
            draft.recent_positions = v;
        }
        if let Some(v) = self.current_work {
            draft.current_work = Some(v);
        }
        if let Some(v) = self.business_name {
            draft.business_name = Some(v);
        }
        if let Some(v) = self.business_address {
            draft.business_address = Some(v);
        }
        if let Some(v) = self.business_nature {
            draft.business_nature = Some(v);
        }
        if let Some(v) = self.unemployment_reasons {
            draft.unemployment_reasons = v;
        }
        if let Some(v) = self.staying_reasons {
            draft.staying_reasons = v;
        }
        if let Some(v) = self.first_job_related {
            draft.first_job_related = Some(v);
        }
        if let Some(v) = self.unrelated_reasons {
            draft.unrelated_reasons = v;
        }
        if let Some(v) = self.change_reasons {
            draft.change_reasons = v;
        }
        if let Some(v) = self.first_job_duration {
            draft.first_job_duration = Some(v);
        }
        if let Some(v) = self.how_found_first_job {
            draft.how_found_first_job = Some(v);
        }
        if let Some(v) = self.time_to_land {
            draft.time_to_land = Some(v);
        }
        if let Some(v) = self.initial_earning {
            draft.initial_earning = Some(v);
        }
        if let Some(v) = self.recent_earning {
            draft.recent_earning = Some(v);
        }
    }
}

/// The immutable payload emitted by a successful final-step submission.
///
/// Required identity and education fields are concrete here, and the
/// employment alternatives are a sum type, so a payload that violates the
/// branch rules cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub surname: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub permanent_address: String,
    pub sex: Sex,
    pub civil_status: CivilStatus,
    pub year_graduated: i32,
    pub college_campus: College,
    pub program: Program,
    pub major: Option<Major>,
    pub department_id: Uuid,
    pub course: String,
    pub advanced_study: Option<AdvancedStudy>,
    pub professional_exam: Option<ProfessionalExam>,
    pub trainings: Vec<String>,
    pub history: EmploymentHistory,
    pub profile_picture: Option<String>,
    pub activity_images: Vec<String>,
}
