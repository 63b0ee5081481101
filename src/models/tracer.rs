use chrono::NaiveDate;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::models::graduates::YesNo;

/// Marker for the literal "Others" option carried by every survey choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtherMarker {
    Others,
}

/// One selectable option: either a listed value or the "Others" escape hatch.
///
/// Deserialized untagged, so `"Others"` falls through to the marker whenever
/// it is not a listed value of `E`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice<E> {
    Listed(E),
    Others(OtherMarker),
}

impl<E> Choice<E> {
    pub fn is_others(&self) -> bool {
        matches!(self, Choice::Others(_))
    }
}

/// A multi-select answer and its "Others" free-text companion.
///
/// The companion is only meaningful (and only required) when `selected`
/// contains the "Others" option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSelect<E> {
    pub selected: Vec<Choice<E>>,
    pub other_text: Option<String>,
}

impl<E> Default for MultiSelect<E> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            other_text: None,
        }
    }
}

impl<E: PartialEq> MultiSelect<E> {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, value: &E) -> bool {
        self.selected
            .iter()
            .any(|c| matches!(c, Choice::Listed(v) if v == value))
    }

    pub fn has_others(&self) -> bool {
        self.selected.iter().any(|c| c.is_others())
    }

    /// The companion text, if it is non-blank after trimming.
    pub fn other_text_trimmed(&self) -> Option<&str> {
        self.other_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A single-choice answer whose option list carries the "Others" escape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOne<E> {
    pub choice: Choice<E>,
    #[serde(default)]
    pub other_text: Option<String>,
}

impl<E> SelectOne<E> {
    pub fn has_others(&self) -> bool {
        self.choice.is_others()
    }

    pub fn other_text_trimmed(&self) -> Option<&str> {
        self.other_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// ── Closed option lists ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvancedStudyReason {
    #[serde(rename = "For promotion")]
    Promotion,
    #[serde(rename = "For professional development")]
    ProfessionalDevelopment,
    #[serde(rename = "To shift profession")]
    ShiftProfession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnemploymentReason {
    #[serde(rename = "Advance or further study")]
    FurtherStudy,
    #[serde(rename = "Family concern")]
    FamilyConcern,
    #[serde(rename = "Health-related reasons")]
    HealthRelated,
    #[serde(rename = "Lack of work experience")]
    LackOfExperience,
    #[serde(rename = "No job opportunity")]
    NoJobOpportunity,
    #[serde(rename = "Did not look for a job")]
    DidNotLook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[serde(rename = "Regular or Permanent")]
    Regular,
    #[serde(rename = "Contractual")]
    Contractual,
    #[serde(rename = "Temporary")]
    Temporary,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    #[serde(rename = "Casual")]
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecentPosition {
    #[serde(rename = "Rank or clerical")]
    RankOrClerical,
    #[serde(rename = "Professional, technical or supervisory")]
    Professional,
    #[serde(rename = "Managerial or executive")]
    Managerial,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StayingReason {
    #[serde(rename = "Salaries and benefits")]
    SalariesAndBenefits,
    #[serde(rename = "Career challenge")]
    CareerChallenge,
    #[serde(rename = "Related to special skill")]
    RelatedToSpecialSkill,
    #[serde(rename = "Related to course of study")]
    RelatedToCourse,
    #[serde(rename = "Proximity to residence")]
    ProximityToResidence,
    #[serde(rename = "Peer influence")]
    PeerInfluence,
    #[serde(rename = "Family influence")]
    FamilyInfluence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnrelatedJobReason {
    #[serde(rename = "Salaries and benefits")]
    SalariesAndBenefits,
    #[serde(rename = "Career challenge")]
    CareerChallenge,
    #[serde(rename = "Proximity to residence")]
    ProximityToResidence,
    #[serde(rename = "Peer influence")]
    PeerInfluence,
    #[serde(rename = "Family influence")]
    FamilyInfluence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobChangeReason {
    #[serde(rename = "Salaries and benefits")]
    SalariesAndBenefits,
    #[serde(rename = "Career challenge")]
    CareerChallenge,
    #[serde(rename = "Related to special skill")]
    RelatedToSpecialSkill,
    #[serde(rename = "Proximity to residence")]
    ProximityToResidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstJobDuration {
    #[serde(rename = "Less than a month")]
    LessThanAMonth,
    #[serde(rename = "1 to 6 months")]
    OneToSixMonths,
    #[serde(rename = "7 to 11 months")]
    SevenToElevenMonths,
    #[serde(rename = "1 year to less than 2 years")]
    OneToTwoYears,
    #[serde(rename = "2 years to less than 3 years")]
    TwoToThreeYears,
    #[serde(rename = "3 years to less than 4 years")]
    ThreeToFourYears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobSearchMethod {
    #[serde(rename = "Response to an advertisement")]
    Advertisement,
    #[serde(rename = "Walk-in applicant")]
    WalkIn,
    #[serde(rename = "Recommended by someone")]
    Recommended,
    #[serde(rename = "Information from friends")]
    Friends,
    #[serde(rename = "Arranged by school's placement officer")]
    SchoolPlacement,
    #[serde(rename = "Family business")]
    FamilyBusiness,
    #[serde(rename = "Job fair or Public Employment Service Office")]
    JobFair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobLandingTime {
    #[serde(rename = "Less than a month")]
    LessThanAMonth,
    #[serde(rename = "1 to 6 months")]
    OneToSixMonths,
    #[serde(rename = "7 to 11 months")]
    SevenToElevenMonths,
    #[serde(rename = "1 year to less than 2 years")]
    OneToTwoYears,
    #[serde(rename = "2 years to less than 3 years")]
    TwoToThreeYears,
    #[serde(rename = "3 years to less than 4 years")]
    ThreeToFourYears,
}

/// Gross monthly earning, always one of 8 fixed brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarningBracket {
    #[serde(rename = "Below P5,000")]
    BelowFiveThousand,
    #[serde(rename = "P5,000 to less than P10,000")]
    FiveToTen,
    #[serde(rename = "P10,000 to less than P15,000")]
    TenToFifteen,
    #[serde(rename = "P15,000 to less than P20,000")]
    FifteenToTwenty,
    #[serde(rename = "P20,000 to less than P25,000")]
    TwentyToTwentyFive,
    #[serde(rename = "P25,000 to less than P30,000")]
    TwentyFiveToThirty,
    #[serde(rename = "P30,000 to less than P40,000")]
    ThirtyToForty,
    #[serde(rename = "P40,000 and above")]
    FortyAndAbove,
}

// ── Persisted answer blocks (stored as JSON columns on the graduate row) ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AdvancedStudy {
    pub school: Option<String>,
    pub date_started: Option<NaiveDate>,
    pub units_earned: Option<String>,
    pub date_graduated: Option<NaiveDate>,
    #[serde(default)]
    pub reasons: MultiSelect<AdvancedStudyReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ProfessionalExam {
    pub exam_name: Option<String>,
    pub license_date: Option<NaiveDate>,
    pub year_taken: Option<i32>,
    pub rating: Option<String>,
}

/// Free-text training titles, at most three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TrainingTitles(pub Vec<String>);

/// Stored file paths, relative to the upload root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ImagePaths(pub Vec<String>);

/// Business details, required as a unit when "Self-employed" is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDetails {
    pub name: String,
    pub address: String,
    pub nature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstJobRecord {
    pub related_to_course: Option<YesNo>,
    #[serde(default)]
    pub unrelated_reasons: MultiSelect<UnrelatedJobReason>,
    #[serde(default)]
    pub change_reasons: MultiSelect<JobChangeReason>,
    pub duration: Option<SelectOne<FirstJobDuration>>,
    pub how_found: Option<SelectOne<JobSearchMethod>>,
    pub time_to_land: Option<SelectOne<JobLandingTime>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct EmploymentRecord {
    pub company_name: String,
    pub company_nature: Option<String>,
    pub company_email: Option<String>,
    pub company_contact: Option<String>,
    pub company_address: Option<String>,
    #[serde(default)]
    pub employment_status: MultiSelect<EmploymentStatus>,
    #[serde(default)]
    pub recent_positions: MultiSelect<RecentPosition>,
    pub current_work: String,
    pub business: Option<BusinessDetails>,
    pub first_job: Option<FirstJobRecord>,
    #[serde(default)]
    pub staying_reasons: MultiSelect<StayingReason>,
    pub initial_earning: Option<EarningBracket>,
    pub recent_earning: Option<EarningBracket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct UnemploymentRecord {
    pub reasons: MultiSelect<UnemploymentReason>,
}

/// Exactly one employment alternative survives on a finalized submission,
/// switched on the `ever_employed` root answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmploymentHistory {
    Employed(EmploymentRecord),
    NeverEmployed(UnemploymentRecord),
}
