use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::infra::store::StoreError;
use crate::state::app_state::AppState;

const HEALTHY_MESSAGE: &str = "Backend is running and connected to MongoDB";
const UNHEALTHY_MESSAGE: &str = "Backend is running but MongoDB connection failed";

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    timestamp: String,
    mongodb: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(RootResponse {
        message: "Actix server with MongoDB",
    }))
}

/// Liveness probe that pings the store through the shared handle.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let outcome = match app_state.store().get_handle() {
        Ok(db) => db.ping().await.map_err(StoreError::Ping),
        Err(e) => Err(e),
    };

    let timestamp = now_timestamp();

    match outcome {
        Ok(()) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            message: HEALTHY_MESSAGE,
            timestamp,
            mongodb: "connected",
            error: None,
        })),
        Err(e) => {
            warn!(error = %e, "health_check=unhealthy");
            Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy",
                message: UNHEALTHY_MESSAGE,
                timestamp,
                mongodb: "disconnected",
                error: Some(e.to_string()),
            }))
        }
    }
}

/// UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
fn now_timestamp() -> String {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    OffsetDateTime::now_utc()
        .format(format)
        .unwrap_or_else(|_| "unknown".to_string())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
