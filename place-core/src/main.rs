use place_core::config::ServerConfig;
use place_core::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();

    // Build app state
    let state = AppState::new(&config.cache, config.matching.clone());

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = config.addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "failed to bind: {e}");
            std::process::exit(1);
        }
    };

    info!("place core listening on http://{addr}");
    info!("  GET  /health           - Health check");
    info!("  POST /hours/parse      - Parse opening hours");
    info!("  POST /places/match     - Reconcile a place with candidate records");
    info!("  POST /places/distance  - Edit distance between two strings");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
