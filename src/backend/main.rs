/**
 * SkillForge Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads the configuration and serves the
 * Axum application.
 */

use std::net::SocketAddr;

use skillforge::backend::server::create_app;
use skillforge::shared::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    let config = AppConfig::from_env()?;
    let port = config.port;

    let app = create_app(config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on port {}", port);
    tracing::info!("Visit: http://localhost:{}", port);

    // Connect info feeds the rate limiter and visitor tracker.
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
