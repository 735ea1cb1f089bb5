// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::pipeline::PipelineDriver;
use crate::application::series_fetcher::SeriesFetcher;
use crate::application::session::{SessionSignal, spawn_chart_refresh};
use crate::application::settings_service::SettingsService;
use crate::infrastructure::chart_board::ChartBoard;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::firebase_store::FirebaseStore;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_chart, get_session, health_check, list_charts, post_command, refresh_charts, sign_in,
    sign_out,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    let label_zone = config.labels.zone()?;

    // Create store (infrastructure layer)
    let store = Arc::new(FirebaseStore::new(
        config.store.base_url,
        config.store.auth_token,
        Duration::from_secs(config.store.request_timeout_secs),
    )?);
    let board = Arc::new(ChartBoard::new());

    // Create services (application layer)
    let fetcher = SeriesFetcher::new(
        store.clone(),
        config.device.id.clone(),
        label_zone,
        config.pipeline.fetch_timeout(),
    );
    let driver = PipelineDriver::new(fetcher, board.clone());
    let settings_service = SettingsService::new(store, config.device.id.clone());
    let session = SessionSignal::new();

    // Charts refresh on every sign-in
    spawn_chart_refresh(driver.clone(), &session);

    let state = Arc::new(AppState {
        board,
        session,
        driver,
        settings_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/charts", get(list_charts))
        .route("/charts/refresh", post(refresh_charts))
        .route("/charts/:id", get(get_chart))
        .route("/session", get(get_session).post(sign_in).delete(sign_out))
        .route("/device/commands", post(post_command))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!(
        "Starting crop monitor dashboard for device {} on {}",
        config.device.id,
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
