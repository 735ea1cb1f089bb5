// Chart sink trait - where finished series are rendered
use crate::domain::series::RenderedChart;
use async_trait::async_trait;

#[async_trait]
pub trait ChartSink: Send + Sync {
    /// Replace whatever the target currently shows with `chart`.
    async fn render(&self, chart: RenderedChart);
}
