// HTTP request handlers
use crate::application::pipeline::PassReport;
use crate::application::settings_service::SettingsError;
use crate::domain::series::RenderedChart;
use crate::domain::settings::DeviceCommand;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SessionView {
    pub signed_in: bool,
    pub user: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CommandResult {
    pub written: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// All charts rendered so far
pub async fn list_charts(State(state): State<Arc<AppState>>) -> Json<Vec<RenderedChart>> {
    Json(state.board.all().await)
}

pub async fn get_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderedChart>, StatusCode> {
    state.board.get(&id).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Run a chart pass now instead of waiting for the next sign-in
pub async fn refresh_charts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PassReport>, StatusCode> {
    if !state.session.current().is_signed_in() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(state.driver.run().await))
}

pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let current = state.session.current();
    Json(SessionView {
        signed_in: current.is_signed_in(),
        user: current.email().map(|email| format!("Current user: {}", email)),
    })
}

/// Reported by the auth provider once the operator has signed in
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignInRequest>,
) -> StatusCode {
    state.session.sign_in(request.email);
    StatusCode::NO_CONTENT
}

pub async fn sign_out(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.sign_out();
    StatusCode::NO_CONTENT
}

/// Write a device setting from the control form
pub async fn post_command(
    State(state): State<Arc<AppState>>,
    Json(command): Json<DeviceCommand>,
) -> Result<Json<CommandResult>, (StatusCode, String)> {
    if !state.session.current().is_signed_in() {
        return Err((StatusCode::UNAUTHORIZED, "sign in first".to_string()));
    }

    match state.settings_service.apply(command).await {
        Ok(written) => Ok(Json(CommandResult { written })),
        Err(e @ SettingsError::InvalidSelection(_)) => {
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e @ SettingsError::Write(_)) => {
            tracing::error!("Error writing device setting: {}", e);
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
