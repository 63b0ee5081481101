use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracer_backend::cache::RedisCache;
use tracer_backend::catalog::DepartmentCatalog;
use tracer_backend::create_pool;
use tracer_backend::handlers;
use tracer_backend::notify::Notifier;
use tracer_backend::storage::LocalFileStore;
use tracer_backend::survey::sessions::SessionManager;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");
    let db_data = web::Data::new(db);

    // Redis backs the read caches for graduates and departments.
    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    let redis_cache = RedisCache::new(&redis_url)
        .await
        .expect("Failed to connect to Redis");
    let redis_data = web::Data::new(Arc::new(redis_cache));
    tracing::info!("Connected to Redis");

    // Uploaded images live on local disk and are served back at /uploads.
    let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());
    let file_store = web::Data::new(LocalFileStore::new(&upload_dir));

    // In-memory state: one workflow per survey session, plus the department
    // index that feeds submission validation.
    let sessions = web::Data::new(Arc::new(SessionManager::new()));
    let catalog_ttl = parse_duration_secs("CACHE_TTL_DEPARTMENTS", 300);
    let catalog = web::Data::new(DepartmentCatalog::new(catalog_ttl));

    let notifier = web::Data::new(Notifier::from_env());

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            // Uploads arrive as raw bytes; allow bodies up to 10 MB.
            .app_data(web::PayloadConfig::new(10 * 1024 * 1024))
            .app_data(db_data.clone())
            .app_data(redis_data.clone())
            .app_data(file_store.clone())
            .app_data(sessions.clone())
            .app_data(catalog.clone())
            .app_data(notifier.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
            .service(Files::new("/uploads", upload_dir.clone()))
    })
    .bind(&bind_addr)?
    .run()
    .await
}

fn parse_duration_secs(env_var: &str, default: u64) -> std::time::Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| std::time::Duration::from_secs(default))
}
