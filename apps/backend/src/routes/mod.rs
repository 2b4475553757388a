use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;

/// Register every application route plus the Problem Details 404 fallback.
///
/// Middleware is applied by the caller (`main.rs` in production, the test
/// app builder in tests).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check routes: /api/health
    cfg.service(web::scope("/api").configure(health::configure_routes));

    cfg.default_service(web::to(not_found));
}

async fn not_found(req: actix_web::HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::NotFound,
        format!("No route for {} {}", req.method(), req.path()),
    ))
}
