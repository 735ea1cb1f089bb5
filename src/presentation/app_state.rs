// Application state for HTTP handlers
use crate::application::pipeline::PipelineDriver;
use crate::application::session::SessionSignal;
use crate::application::settings_service::SettingsService;
use crate::infrastructure::chart_board::ChartBoard;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<ChartBoard>,
    pub session: SessionSignal,
    pub driver: PipelineDriver,
    pub settings_service: SettingsService,
}
