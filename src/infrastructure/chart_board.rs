// Chart board - keeps the last series rendered into each chart target
use crate::application::chart_sink::ChartSink;
use crate::domain::series::RenderedChart;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct ChartBoard {
    charts: RwLock<BTreeMap<String, RenderedChart>>,
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<RenderedChart> {
        self.charts.read().await.values().cloned().collect()
    }

    pub async fn get(&self, target_id: &str) -> Option<RenderedChart> {
        self.charts.read().await.get(target_id).cloned()
    }
}

#[async_trait]
impl ChartSink for ChartBoard {
    async fn render(&self, chart: RenderedChart) {
        tracing::debug!(
            "Rendering {} with {} points",
            chart.target_id,
            chart.series.len()
        );
        self.charts
            .write()
            .await
            .insert(chart.target_id.clone(), chart);
    }
}
