// Domain layer - Sensor channels, store keys and chart series
pub mod channel;
pub mod identifier;
pub mod series;
pub mod settings;
