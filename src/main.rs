/**
 * linkbio Server Entry Point
 *
 * Loads configuration, initializes tracing, assembles the application,
 * and serves it. Connect info is attached so the per-address rate
 * limiter can see who is asking.
 */

use std::net::SocketAddr;

use linkbio::server::{config::AppConfig, init::create_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,linkbio=debug".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = AppConfig::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let app = create_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
