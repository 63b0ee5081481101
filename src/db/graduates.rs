use sea_orm::*;
use uuid::Uuid;

use crate::models::graduates::{self, GraduateStatus};
use crate::models::tracer::{EmploymentHistory, ImagePaths, TrainingTitles};
use crate::survey::draft::SubmissionPayload;

/// Insert a freshly submitted graduate profile (always starts Pending).
///
/// One row carries the whole submission, so the insert is atomic: either
/// the full profile exists afterwards or nothing does.
pub async fn insert_graduate(
    db: &DatabaseConnection,
    payload: SubmissionPayload,
) -> Result<graduates::Model, DbErr> {
    let (employment, unemployment) = match payload.history {
        EmploymentHistory::Employed(record) => (Some(record), None),
        EmploymentHistory::NeverEmployed(record) => (None, Some(record)),
    };
    let ever_employed = if employment.is_some() {
        graduates::YesNo::Yes
    } else {
        graduates::YesNo::No
    };

    let new_graduate = graduates::ActiveModel {
        id: Set(Uuid::new_v4()),
        surname: Set(payload.surname),
        first_name: Set(payload.first_name),
        middle_name: Set(payload.middle_name),
        email: Set(Some(payload.email)),
        phone: Set(payload.phone),
        permanent_address: Set(payload.permanent_address),
        sex: Set(payload.sex),
        civil_status: Set(payload.civil_status),
        year_graduated: Set(payload.year_graduated),
        college_campus: Set(payload.college_campus),
        program: Set(payload.program),
        major: Set(payload.major),
        department_id: Set(payload.department_id),
        course: Set(payload.course),
        advanced_study: Set(payload.advanced_study),
        professional_exam: Set(payload.professional_exam),
        trainings: Set(TrainingTitles(payload.trainings)),
        ever_employed: Set(ever_employed),
        employment: Set(employment),
        unemployment: Set(unemployment),
        profile_picture: Set(payload.profile_picture),
        activity_images: Set(ImagePaths(payload.activity_images)),
        status: Set(GraduateStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_graduate.insert(db).await
}

/// Fetch a single graduate profile by ID.
pub async fn get_graduate_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<graduates::Model>, DbErr> {
    graduates::Entity::find_by_id(id).one(db).await
}

/// Fetch a graduate profile by exact email.
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<graduates::Model>, DbErr> {
    graduates::Entity::find()
        .filter(graduates::Column::Email.eq(email))
        .one(db)
        .await
}

/// List graduate profiles, newest first, optionally filtered by status.
pub async fn get_graduates_paginated(
    db: &DatabaseConnection,
    status: Option<GraduateStatus>,
    page: u64,
    limit: u64,
) -> Result<Vec<graduates::Model>, DbErr> {
    let mut query = graduates::Entity::find().order_by_desc(graduates::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(graduates::Column::Status.eq(status));
    }
    query.paginate(db, limit).fetch_page(page - 1).await
}

/// Overwrite a profile's approval status.
pub async fn update_graduate_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: GraduateStatus,
) -> Result<graduates::Model, DbErr> {
    let graduate = graduates::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Graduate not found".to_string()))?;

    let mut active: graduates::ActiveModel = graduate.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// All profiles that can participate in the status sync (email present).
pub async fn get_profiles_with_email(
    db: &DatabaseConnection,
) -> Result<Vec<graduates::Model>, DbErr> {
    graduates::Entity::find()
        .filter(graduates::Column::Email.is_not_null())
        .all(db)
        .await
}
