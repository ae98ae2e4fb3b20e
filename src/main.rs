use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use voice_console::api::ApiClient;
use voice_console::config::AppConfig;
use voice_console::handlers;
use voice_console::services::connectivity::{ConnectivityWatcher, HttpProbe};
use voice_console::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("using upstream API at {}", config.api_url);

    let api = ApiClient::new(config.api_url.clone());

    let probe = HttpProbe::new(
        api.http().clone(),
        api.base_url(),
        config.probe_fallback_url.clone(),
        config.probe_policy.timeout,
    );
    let (watcher, connectivity) =
        ConnectivityWatcher::new(Arc::new(probe), config.probe_policy.clone());
    watcher.spawn();

    let state = Arc::new(AppState::new(config.clone(), api, connectivity));
    let app = handlers::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
