use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use academy::config::AppConfig;
use academy::routes;
use academy::services::remote::http::HttpTransport;
use academy::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        config.backend_url.starts_with("http://") || config.backend_url.starts_with("https://"),
        "BACKEND_URL must be an http(s) URL"
    );
    tracing::info!(backend = %config.backend_url, "using REST backend");

    let transport = HttpTransport::new(config.backend_url.clone());
    let state = Arc::new(AppState::new(config.clone(), Box::new(transport)));
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
