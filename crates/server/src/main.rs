use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use shared::protocol::USER_DATA_ROUTE;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, validate_static_dir, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let settings = load_settings();
    if let Err(error) = validate_static_dir(&settings) {
        warn!(%error, "static assets will not be served until the directory exists");
    }
    let app = build_router(&settings);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        %addr,
        static_dir = %settings.static_dir.display(),
        data_file = %settings.data_file.display(),
        "server listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(settings: &Settings) -> Router {
    let state = Arc::new(AppState {
        data_file: settings.data_file.clone(),
    });
    Router::new()
        .route("/healthz", get(api::healthz))
        .route(USER_DATA_ROUTE, get(api::user_data))
        .with_state(state)
        .fallback_service(ServeDir::new(&settings.static_dir))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
