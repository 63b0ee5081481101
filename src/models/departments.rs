use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `departments` table — the catalog that graduate
/// profiles reference by `department_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::graduates::Entity")]
    Graduates,
}

impl Related<super::graduates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Graduates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Used by the `POST /api/departments` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
}
