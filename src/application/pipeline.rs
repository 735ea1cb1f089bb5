// Pipeline driver - one fetch-and-render pass over every channel
use crate::application::chart_sink::ChartSink;
use crate::application::sensor_store::RetrievalError;
use crate::application::series_fetcher::SeriesFetcher;
use crate::domain::channel::{AxisScale, ChannelSpec, all_channels};
use crate::domain::series::{RenderedChart, Series};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassReport {
    /// Chart targets that received a fresh series.
    pub rendered: Vec<String>,
    pub failed: Vec<FailedChannel>,
}

/// A channel whose chart was left as it was.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedChannel {
    pub channel: String,
    pub error: String,
}

#[derive(Clone)]
pub struct PipelineDriver {
    fetcher: SeriesFetcher,
    sink: Arc<dyn ChartSink>,
    channels: &'static [ChannelSpec],
}

impl PipelineDriver {
    pub fn new(fetcher: SeriesFetcher, sink: Arc<dyn ChartSink>) -> Self {
        Self {
            fetcher,
            sink,
            channels: all_channels(),
        }
    }

    /// Fetch every channel concurrently and render each series as it lands.
    /// A failing channel leaves its chart untouched and never stops the others.
    pub async fn run(&self) -> PassReport {
        let start_time = Instant::now();

        let channels: &'static [ChannelSpec] = self.channels;
        let tasks: Vec<_> = channels
            .iter()
            .map(|spec| {
                let fetcher = self.fetcher.clone();
                let sink = self.sink.clone();
                let handle = tokio::spawn(async move {
                    let series = fetcher.fetch(spec).await?;
                    sink.render(to_chart(spec, series)).await;
                    Ok::<_, RetrievalError>(())
                });
                (spec, handle)
            })
            .collect();

        let mut report = PassReport::default();
        for (spec, handle) in tasks {
            let outcome = handle
                .await
                .unwrap_or_else(|e| Err(RetrievalError::Join(e.to_string())));

            match outcome {
                Ok(()) => report.rendered.push(spec.chart_id.to_string()),
                Err(e) => {
                    tracing::warn!(
                        "Chart {} not updated, {} fetch failed: {}",
                        spec.chart_id,
                        spec.key,
                        e
                    );
                    report.failed.push(FailedChannel {
                        channel: spec.key.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Chart pass finished in {}ms: {} rendered, {} failed",
            start_time.elapsed().as_millis(),
            report.rendered.len(),
            report.failed.len()
        );
        report
    }
}

fn to_chart(spec: &ChannelSpec, series: Series) -> RenderedChart {
    let (low, high) = match spec.axis {
        AxisScale::Fixed { low, high } => (Some(low), Some(high)),
        AxisScale::Auto => (None, None),
    };

    RenderedChart {
        target_id: spec.chart_id.to_string(),
        title: spec.name.to_string(),
        labels: series.labels(),
        series: series.values(),
        low,
        high,
    }
}
