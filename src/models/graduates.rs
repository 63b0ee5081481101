use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::tracer::{
    AdvancedStudy, EmploymentRecord, ImagePaths, ProfessionalExam, TrainingTitles,
    UnemploymentRecord,
};

/// Approval status of a graduate profile, stored as a lowercase string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum GraduateStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl GraduateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraduateStatus::Pending => "pending",
            GraduateStatus::Approved => "approved",
            GraduateStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for GraduateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Sex {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CivilStatus {
    #[sea_orm(string_value = "single")]
    Single,
    #[sea_orm(string_value = "married")]
    Married,
    #[sea_orm(string_value = "separated_or_divorced")]
    #[serde(rename = "Separated or Divorced")]
    SeparatedOrDivorced,
    #[sea_orm(string_value = "widow_or_widower")]
    #[serde(rename = "Widow or Widower")]
    WidowOrWidower,
    #[sea_orm(string_value = "single_parent")]
    #[serde(rename = "Single Parent")]
    SingleParent,
}

/// The primary branch point of the tracer survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum YesNo {
    #[sea_orm(string_value = "yes")]
    Yes,
    #[sea_orm(string_value = "no")]
    No,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum College {
    #[sea_orm(string_value = "arts_and_sciences")]
    #[serde(rename = "College of Arts and Sciences")]
    ArtsAndSciences,
    #[sea_orm(string_value = "business_administration")]
    #[serde(rename = "College of Business Administration")]
    BusinessAdministration,
    #[sea_orm(string_value = "computing_studies")]
    #[serde(rename = "College of Computing Studies")]
    ComputingStudies,
    #[sea_orm(string_value = "education")]
    #[serde(rename = "College of Education")]
    Education,
    #[sea_orm(string_value = "engineering")]
    #[serde(rename = "College of Engineering")]
    Engineering,
    #[sea_orm(string_value = "nursing")]
    #[serde(rename = "College of Nursing")]
    Nursing,
    #[sea_orm(string_value = "agriculture")]
    #[serde(rename = "College of Agriculture")]
    Agriculture,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Program {
    #[sea_orm(string_value = "bs_computer_science")]
    #[serde(rename = "BS Computer Science")]
    ComputerScience,
    #[sea_orm(string_value = "bs_information_technology")]
    #[serde(rename = "BS Information Technology")]
    InformationTechnology,
    #[sea_orm(string_value = "bs_civil_engineering")]
    #[serde(rename = "BS Civil Engineering")]
    CivilEngineering,
    #[sea_orm(string_value = "bs_electrical_engineering")]
    #[serde(rename = "BS Electrical Engineering")]
    ElectricalEngineering,
    #[sea_orm(string_value = "bs_business_administration")]
    #[serde(rename = "BS Business Administration")]
    BusinessAdministration,
    #[sea_orm(string_value = "bs_accountancy")]
    #[serde(rename = "BS Accountancy")]
    Accountancy,
    #[sea_orm(string_value = "bs_nursing")]
    #[serde(rename = "BS Nursing")]
    Nursing,
    #[sea_orm(string_value = "bs_agriculture")]
    #[serde(rename = "BS Agriculture")]
    Agriculture,
    #[sea_orm(string_value = "bachelor_elementary_education")]
    #[serde(rename = "Bachelor of Elementary Education")]
    ElementaryEducation,
    #[sea_orm(string_value = "bachelor_secondary_education")]
    #[serde(rename = "Bachelor of Secondary Education")]
    SecondaryEducation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Major {
    #[sea_orm(string_value = "english")]
    English,
    #[sea_orm(string_value = "filipino")]
    Filipino,
    #[sea_orm(string_value = "mathematics")]
    Mathematics,
    #[sea_orm(string_value = "science")]
    Science,
    #[sea_orm(string_value = "social_studies")]
    #[serde(rename = "Social Studies")]
    SocialStudies,
    #[sea_orm(string_value = "human_resource")]
    #[serde(rename = "Human Resource")]
    HumanResource,
    #[sea_orm(string_value = "marketing")]
    Marketing,
}

/// SeaORM entity for the `graduates` table — one row per tracer survey
/// submission, created atomically at final-step submission.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "graduates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub surname: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
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
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub advanced_study: Option<AdvancedStudy>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub professional_exam: Option<ProfessionalExam>,
    #[sea_orm(column_type = "JsonBinary")]
    pub trainings: TrainingTitles,
    pub ever_employed: YesNo,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub employment: Option<EmploymentRecord>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub unemployment: Option<UnemploymentRecord>,
    pub profile_picture: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub activity_images: ImagePaths,
    pub status: GraduateStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Used by the `PUT /api/graduates/{id}/status` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGraduateStatus {
    pub status: GraduateStatus,
}

/// Query params for the graduate listing: `?page=1&limit=20&status=pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraduateListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<GraduateStatus>,
}

impl GraduateListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}
