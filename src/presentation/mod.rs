// Presentation layer - HTTP routes for the dashboard page
pub mod app_state;
pub mod handlers;
