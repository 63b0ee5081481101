use sea_orm::*;
use uuid::Uuid;

use crate::models::users;

/// Fetch every user account, for the status reconciliation pass.
pub async fn get_all_accounts(db: &DatabaseConnection) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find().all(db).await
}

/// Overwrite the single `status` field of one account.
pub async fn update_account_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: &str,
) -> Result<users::Model, DbErr> {
    let account = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User account not found".to_string()))?;

    let mut active: users::ActiveModel = account.into();
    active.status = Set(status.to_string());
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
