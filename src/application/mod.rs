// Application layer - Use cases over the store and chart sink
pub mod chart_sink;
pub mod pipeline;
pub mod sensor_store;
pub mod series_fetcher;
pub mod session;
pub mod settings_service;

#[cfg(test)]
pub(crate) mod testing;
