use actix_web::{web, App, HttpServer};
use tracing::{error, info};

use crate::config::server::ServerConfig;
use crate::middleware::cors::cors_middleware;
use crate::middleware::request_trace::RequestTrace;
use crate::middleware::structured_logger::StructuredLogger;
use crate::middleware::trace_span::TraceSpan;
use crate::routes;
use crate::state::app_state::AppState;

/// Bind the HTTP server and run it until shutdown.
///
/// The store held by `app_state` is closed on every exit path, including a
/// failed bind.
pub async fn serve(config: &ServerConfig, app_state: AppState) -> std::io::Result<()> {
    let result = run(config, &app_state).await;

    if let Err(e) = app_state.store().close().await {
        error!(error = %e, "shutdown=store_close_failed");
    }
    info!("server=stopped");

    result
}

async fn run(config: &ServerConfig, app_state: &AppState) -> std::io::Result<()> {
    let data = web::Data::new(app_state.clone());
    let host = config.host.as_str();
    let port = config.port;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host, port))
    .inspect_err(|e| error!(host = %host, port, error = %e, "server=bind_failed"))?
    .run();

    println!("🚀 Server running on http://localhost:{port}");
    info!(host = %host, port, "server=listening");

    server.await
}
