use api_shell::{
    config::ServerConfig,
    demo::{DummyCollection, dummy_shell},
    logging::{init_telemetry, shutdown_telemetry},
};
use axum::Router;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables first
    dotenvy::dotenv().ok();

    init_telemetry(None)?;

    let config = ServerConfig::from_env()?;

    tracing::info!(base_route = %config.base_route, "Starting API shell demo");

    // The callbacks are where a real service talks to its database or forwards the request
    let shell = dummy_shell(&config.base_route, DummyCollection::new()).into_router()?;

    let app = Router::new().merge(shell).layer(CorsLayer::permissive());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        address = %addr,
        endpoints = ?vec![
            format!("POST {}/api/", config.base_route),
            format!("GET {}/api/", config.base_route),
            format!("GET|PUT|DELETE {}/api/:id", config.base_route),
            format!("GET {}/delete/:id", config.base_route),
            format!("POST {}/dirty/", config.base_route),
        ],
        "Server listening and ready to accept connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_telemetry();

    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("Shutdown signal received, cleaning up...");
}
