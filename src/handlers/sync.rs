use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::lifecycle;

/// POST /api/graduates/sync-statuses — push every graduate's status onto
/// the matching user account and report the counts.
///
/// Safe to call repeatedly: a second run with no intervening changes
/// reports everything as already in sync.
pub async fn run_status_sync(db: web::Data<DatabaseConnection>) -> impl Responder {
    match lifecycle::run_sync(db.get_ref()).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Status sync failed: {e}"),
        })),
    }
}
