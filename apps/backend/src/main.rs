use scaffold_backend::config::AppConfig;
use scaffold_backend::infra::state::build_state;
use scaffold_backend::{server, telemetry};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_store_config(config.store.clone())
        .connected()
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "startup=failed");
            eprintln!("❌ Failed to start server: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Connected to MongoDB");

    server::serve(&config.server, app_state).await
}
