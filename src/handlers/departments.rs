use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::cache::{RedisCache, keys};
use crate::catalog::DepartmentCatalog;
use crate::db::departments as department_db;
use crate::models::departments::CreateDepartment;

/// GET /api/departments — the department catalog, alphabetically.
pub async fn get_departments(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
) -> impl Responder {
    let cache_key = keys::departments();

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match department_db::get_all_departments(db.get_ref()).await {
        Ok(departments) => {
            let _ = cache.set(&cache_key, &departments, Some(900)).await;
            HttpResponse::Ok().json(departments)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch departments: {e}"),
        })),
    }
}

/// POST /api/departments — add a department to the catalog.
pub async fn create_department(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    catalog: web::Data<DepartmentCatalog>,
    body: web::Json<CreateDepartment>,
) -> impl Responder {
    let input = body.into_inner();
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "errors": [{ "field": "name", "reason": "this field is required" }],
        }));
    }

    // One department per name.
    match department_db::find_by_name(db.get_ref(), &name).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("Department \"{name}\" already exists"),
            }));
        }
        Ok(None) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match department_db::insert_department(db.get_ref(), CreateDepartment { name }).await {
        Ok(department) => {
            let _ = cache.delete(&keys::departments()).await;
            catalog.invalidate().await;
            HttpResponse::Created().json(department)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create department: {e}"),
        })),
    }
}
