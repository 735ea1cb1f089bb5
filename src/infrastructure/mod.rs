// Infrastructure layer - External dependencies and adapters
pub mod chart_board;
pub mod config;
pub mod firebase_store;
