use sea_orm::*;
use uuid::Uuid;

use crate::models::departments::{self, CreateDepartment};

/// Fetch all departments, alphabetically.
pub async fn get_all_departments(
    db: &DatabaseConnection,
) -> Result<Vec<departments::Model>, DbErr> {
    departments::Entity::find()
        .order_by_asc(departments::Column::Name)
        .all(db)
        .await
}

/// Fetch a department by its exact name.
pub async fn find_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<departments::Model>, DbErr> {
    departments::Entity::find()
        .filter(departments::Column::Name.eq(name))
        .one(db)
        .await
}

/// Insert a new department.
pub async fn insert_department(
    db: &DatabaseConnection,
    input: CreateDepartment,
) -> Result<departments::Model, DbErr> {
    let new_department = departments::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        created_at: Set(chrono::Utc::now()),
    };

    new_department.insert(db).await
}
