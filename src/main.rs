use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use build_bridge::server::{AppState, build_router};
use build_bridge::trigger::TriggerSettings;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "build_bridge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = settings_from_env();
    let app = build_router(AppState::new(settings));

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Builds settings from the environment, keeping defaults for anything
/// unset.
fn settings_from_env() -> TriggerSettings {
    let mut settings = TriggerSettings::default();
    if let Ok(url) = std::env::var("BRIDGE_GITHUB_API_URL") {
        settings.server_api_url = url;
    }
    if let Ok(token) = std::env::var("BRIDGE_GITHUB_TOKEN") {
        settings.access_token = token;
    }
    if let Ok(url) = std::env::var("BRIDGE_PUBLISHED_URL") {
        settings.published_url = Some(url);
    }
    settings
}
