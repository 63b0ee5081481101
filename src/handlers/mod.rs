pub mod departments;
pub mod graduates;
pub mod surveys;
pub mod sync;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Survey workflow routes (one session per respondent) ──
    cfg.service(
        web::scope("/survey/sessions")
            .route("", web::post().to(surveys::open_session))
            .route("/{id}", web::get().to(surveys::get_session))
            .route("/{id}", web::delete().to(surveys::abandon_session))
            .route("/{id}/answers", web::put().to(surveys::update_answers))
            .route("/{id}/advance", web::post().to(surveys::advance))
            .route("/{id}/retreat", web::post().to(surveys::retreat))
            .route("/{id}/files", web::post().to(surveys::upload_file))
            .route("/{id}/submit", web::post().to(surveys::submit)),
    );

    // ── Graduate profile routes (admin back-office) ──
    // `/sync-statuses` is registered before `/{id}` so it matches first.
    cfg.service(
        web::scope("/graduates")
            .route("", web::get().to(graduates::get_graduates))
            .route("", web::post().to(graduates::register_graduate))
            .route("/sync-statuses", web::post().to(sync::run_status_sync))
            .route("/{id}", web::get().to(graduates::get_graduate))
            .route("/{id}/status", web::put().to(graduates::update_status)),
    );

    // ── Department catalog routes ──
    cfg.service(
        web::scope("/departments")
            .route("", web::get().to(departments::get_departments))
            .route("", web::post().to(departments::create_department)),
    );
}
