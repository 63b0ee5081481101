use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::catalog::DepartmentCatalog;
use crate::db::graduates as graduate_db;
use crate::notify::Notifier;
use crate::storage::{FileConstraints, LocalFileStore, StorageError};
use crate::survey::draft::DraftUpdate;
use crate::survey::sessions::SessionManager;
use crate::survey::workflow::WorkflowError;

/// Map workflow refusals onto HTTP: validation batches are 422 so the form
/// can show every problem at once, conflicts are 409.
fn workflow_error_response(err: WorkflowError) -> HttpResponse {
    match err {
        WorkflowError::Validation(errors) => {
            HttpResponse::UnprocessableEntity().json(serde_json::json!({ "errors": errors }))
        }
        WorkflowError::Conflict(reason) => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": reason }))
        }
    }
}

fn session_not_found(id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": format!("Survey session {id} not found"),
    }))
}

/// POST /api/survey/sessions — open a fresh tracer survey workflow.
pub async fn open_session(sessions: web::Data<Arc<SessionManager>>) -> impl Responder {
    let id = sessions.open().await;
    tracing::info!("Opened survey session {id}");
    HttpResponse::Created().json(serde_json::json!({
        "session_id": id,
        "step": 1,
    }))
}

/// GET /api/survey/sessions/{id} — current step, phase, draft and errors.
pub async fn get_session(
    sessions: web::Data<Arc<SessionManager>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match sessions.snapshot(id).await {
        Some(workflow) => HttpResponse::Ok().json(workflow),
        None => session_not_found(id),
    }
}

/// PUT /api/survey/sessions/{id}/answers — merge a partial answer patch.
///
/// Only the fields present in the body overwrite the draft, so answers
/// entered on other steps survive.
pub async fn update_answers(
    sessions: web::Data<Arc<SessionManager>>,
    path: web::Path<Uuid>,
    body: web::Json<DraftUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    match sessions
        .with_workflow(id, |wf| wf.apply(body.into_inner()))
        .await
    {
        Some(Ok(())) => HttpResponse::Ok().json(serde_json::json!({
            "message": "answers saved",
        })),
        Some(Err(e)) => workflow_error_response(e),
        None => session_not_found(id),
    }
}

/// POST /api/survey/sessions/{id}/advance — validate the current step and
/// move forward. A refusal returns the full error batch and no state change.
pub async fn advance(
    sessions: web::Data<Arc<SessionManager>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match sessions.with_workflow(id, |wf| wf.advance()).await {
        Some(Ok(step)) => HttpResponse::Ok().json(serde_json::json!({ "step": step })),
        Some(Err(e)) => workflow_error_response(e),
        None => session_not_found(id),
    }
}

/// POST /api/survey/sessions/{id}/retreat — step back without losing answers.
pub async fn retreat(
    sessions: web::Data<Arc<SessionManager>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match sessions.with_workflow(id, |wf| wf.retreat()).await {
        Some(Ok(step)) => HttpResponse::Ok().json(serde_json::json!({ "step": step })),
        Some(Err(e)) => workflow_error_response(e),
        None => session_not_found(id),
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    ProfilePicture,
    ActivityImage,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub kind: UploadKind,
}

/// POST /api/survey/sessions/{id}/files?kind=activity_image — store an
/// upload and attach it to the draft.
///
/// Constraint violations surface as field-level validation errors; the
/// activity-image count is enforced at submission, not here.
pub async fn upload_file(
    sessions: web::Data<Arc<SessionManager>>,
    store: web::Data<LocalFileStore>,
    path: web::Path<Uuid>,
    query: web::Query<UploadQuery>,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    let id = path.into_inner();

    // 1. Don't write files for sessions that don't exist.
    if sessions.snapshot(id).await.is_none() {
        return session_not_found(id);
    }

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let (constraints, field) = match query.kind {
        UploadKind::ProfilePicture => (FileConstraints::profile_picture(), "profile_picture"),
        UploadKind::ActivityImage => (FileConstraints::activity_image(), "activity_images"),
    };

    // 2. Run the storage boundary checks and persist the bytes.
    let stored = match store.store(&body, &content_type, &constraints).await {
        Ok(stored) => stored,
        Err(e @ (StorageError::TooLarge { .. } | StorageError::WrongType { .. })) => {
            return HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "errors": [{ "field": field, "reason": e.to_string() }],
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to store file: {e}"),
            }));
        }
    };

    // 3. Attach the stored path to the draft.
    let file_path = stored.path.clone();
    let attached = sessions
        .with_workflow(id, |wf| match query.kind {
            UploadKind::ProfilePicture => wf.set_profile_picture(file_path),
            UploadKind::ActivityImage => wf.add_activity_image(file_path),
        })
        .await;

    match attached {
        Some(Ok(())) => HttpResponse::Created().json(stored),
        Some(Err(e)) => workflow_error_response(e),
        None => session_not_found(id),
    }
}

/// POST /api/survey/sessions/{id}/submit — final validation and the one
/// atomic persistence write of the whole profile.
pub async fn submit(
    sessions: web::Data<Arc<SessionManager>>,
    db: web::Data<DatabaseConnection>,
    catalog: web::Data<DepartmentCatalog>,
    cache: web::Data<Arc<RedisCache>>,
    notifier: web::Data<Notifier>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    // 1. Department snapshot for the referential check.
    let departments = match catalog.index(db.get_ref()).await {
        Ok(index) => index,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // 2. Duplicate-email pre-check; the unique column would reject it
    //    anyway, but a field error is friendlier than a 500.
    let email = match sessions.snapshot(id).await {
        Some(workflow) => workflow.draft().email.clone(),
        None => return session_not_found(id),
    };
    if let Some(email) = email {
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

    // 3. Validate the whole draft and seal the workflow.
    let payload = match sessions
        .with_workflow(id, |wf| wf.submit(&departments))
        .await
    {
        Some(Ok(payload)) => payload,
        Some(Err(e)) => return workflow_error_response(e),
        None => return session_not_found(id),
    };

    // 4. Single-row insert; on failure the workflow reopens so no answers
    //    are stranded and no partial record exists.
    match graduate_db::insert_graduate(db.get_ref(), payload).await {
        Ok(graduate) => {
            let _ = cache.delete_pattern(&keys::graduate_list_pattern()).await;
            notifier.submission_received(&graduate);
            tracing::info!("Survey session {id} submitted as graduate {}", graduate.id);
            HttpResponse::Created().json(graduate)
        }
        Err(e) => {
            sessions.with_workflow(id, |wf| wf.reopen()).await;
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create graduate profile: {e}"),
            }))
        }
    }
}

/// DELETE /api/survey/sessions/{id} — abandon the survey and drop the
/// session. No partial record survives.
pub async fn abandon_session(
    sessions: web::Data<Arc<SessionManager>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match sessions.with_workflow(id, |wf| wf.abandon()).await {
        Some(Ok(())) => {
            sessions.close(id).await;
            HttpResponse::Ok().json(serde_json::json!({
                "message": format!("Survey session {id} abandoned"),
            }))
        }
        Some(Err(e)) => workflow_error_response(e),
        None => session_not_found(id),
    }
}
