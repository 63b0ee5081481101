use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::catalog::DepartmentCatalog;
use crate::db::graduates as graduate_db;
use crate::lifecycle;
use crate::models::graduates::{GraduateListQuery, UpdateGraduateStatus};
use crate::notify::Notifier;
use crate::survey::draft::DraftUpdate;
use crate::survey::workflow::{SurveyWorkflow, WorkflowError};

/// GET /api/graduates — list graduate profiles with pagination and an
/// optional status filter. Query params: ?page=1&limit=20&status=pending
pub async fn get_graduates(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    query: web::Query<GraduateListQuery>,
) -> impl Responder {
    let page = query.page();
    let limit = query.limit();
    let status = query.status.clone();
    let filter = format!(
        "{}:{page}:{limit}",
        status.as_ref().map(|s| s.as_str()).unwrap_or("all")
    );
    let cache_key = keys::graduate_list(&filter);

    // Try the cache first; fall back to the database on miss or error.
    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match graduate_db::get_graduates_paginated(db.get_ref(), status, page, limit).await {
        Ok(graduates) => {
            // 5 minute TTL; writes invalidate the whole listing pattern.
            let _ = cache.set(&cache_key, &graduates, Some(300)).await;
            HttpResponse::Ok().json(graduates)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch graduates: {e}"),
        })),
    }
}

/// GET /api/graduates/{id} — get a single graduate profile.
pub async fn get_graduate(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::graduate(&id.to_string());

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => {
            // Cache miss - fetch from database
            match graduate_db::get_graduate_by_id(db.get_ref(), id).await {
                Ok(Some(graduate)) => {
                    // Store in cache (15 minute TTL)
                    let _ = cache.set(&cache_key, &graduate, Some(900)).await;
                    HttpResponse::Ok().json(graduate)
                }
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Graduate {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
        Err(e) => {
            // Cache error - fallback to database
            tracing::warn!("Cache error: {}", e);
            match graduate_db::get_graduate_by_id(db.get_ref(), id).await {
                Ok(Some(graduate)) => HttpResponse::Ok().json(graduate),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Graduate {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
    }
}

/// POST /api/graduates — admin registration of a graduate in one request.
///
/// The full answer set is driven through the same step-by-step workflow the
/// self-registration flow uses, so both paths enforce identical rules.
pub async fn register_graduate(
    db: web::Data<DatabaseConnection>,
    catalog: web::Data<DepartmentCatalog>,
    cache: web::Data<Arc<RedisCache>>,
    notifier: web::Data<Notifier>,
    body: web::Json<DraftUpdate>,
) -> impl Responder {
    // 1. Department snapshot for the referential check.
    let departments = match catalog.index(db.get_ref()).await {
        Ok(index) => index,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // 2. Feed the answers into a fresh workflow.
    let mut workflow = SurveyWorkflow::new();
    if let Err(e) = workflow.apply(body.into_inner()) {
        return match e {
            WorkflowError::Validation(errors) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({ "errors": errors }))
            }
            WorkflowError::Conflict(reason) => {
                HttpResponse::Conflict().json(serde_json::json!({ "error": reason }))
            }
        };
    }

    // 3. Duplicate-email pre-check.
    if let Some(email) = workflow.draft().email.clone() {
        match graduate_db::find_by_email(db.get_ref(), email.trim()).await {
            Ok(Some(_)) => {
                return HttpResponse::UnprocessableEntity().json(serde_json::json!({
                    "errors": [{
                        "field": "email",
                        "reason": "a graduate profile with this email already exists",
                    }],
                }));
            }
            Ok(None) => {}
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    // 4. Run every step plus final validation, then persist.
    let payload = match workflow.run_to_submission(&departments) {
        Ok(payload) => payload,
        Err(WorkflowError::Validation(errors)) => {
            return HttpResponse::UnprocessableEntity()
                .json(serde_json::json!({ "errors": errors }));
        }
        Err(WorkflowError::Conflict(reason)) => {
            return HttpResponse::Conflict().json(serde_json::json!({ "error": reason }));
        }
    };

    match graduate_db::insert_graduate(db.get_ref(), payload).await {
        Ok(graduate) => {
            let _ = cache.delete_pattern(&keys::graduate_list_pattern()).await;
            notifier.submission_received(&graduate);
            HttpResponse::Created().json(graduate)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create graduate profile: {e}"),
        })),
    }
}

/// PUT /api/graduates/{id}/status — move a profile through the approval
/// lifecycle. Transitions outside the allowed table are refused.
pub async fn update_status(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    notifier: web::Data<Notifier>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGraduateStatus>,
) -> impl Responder {
    let id = path.into_inner();

    // 1. Fetch the profile.
    let graduate = match graduate_db::get_graduate_by_id(db.get_ref(), id).await {
        Ok(Some(graduate)) => graduate,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Graduate {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // 2. Check the transition table.
    let target = body.into_inner().status;
    if let Err(e) = lifecycle::check_transition(&graduate.status, &target) {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": e.to_string(),
        }));
    }

    // 3. Persist, invalidate caches and notify.
    match graduate_db::update_graduate_status(db.get_ref(), id, target).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::graduate(&id.to_string())).await;
            let _ = cache.delete_pattern(&keys::graduate_list_pattern()).await;
            notifier.status_changed(&updated, &graduate.status);
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update graduate status: {e}"),
        })),
    }
}
