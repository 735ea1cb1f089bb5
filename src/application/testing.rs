// In-memory store and chart sink for tests
use crate::application::chart_sink::ChartSink;
use crate::application::sensor_store::{RetrievalError, SensorStore, WriteError};
use crate::domain::series::{RawEntry, RenderedChart};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeStore {
    entries: HashMap<String, Vec<RawEntry>>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    delay: Option<Duration>,
    writes: Mutex<Vec<(String, Value)>>,
    reads: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `entries` must already be in key order.
    pub fn with_entries(mut self, path: &str, entries: Vec<RawEntry>) -> Self {
        self.entries.insert(path.to_string(), entries);
        self
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn panicking(mut self, path: &str) -> Self {
        self.panicking.insert(path.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn writes(&self) -> Vec<(String, Value)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl SensorStore for FakeStore {
    async fn get_last_n(&self, path: &str, n: usize) -> Result<Vec<RawEntry>, RetrievalError> {
        self.reads.lock().unwrap().push(path.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panicking.contains(path) {
            panic!("store exploded reading {}", path);
        }
        if self.failing.contains(path) {
            return Err(RetrievalError::Status {
                status: 401,
                body: "Permission denied".to_string(),
            });
        }

        let entries = self.entries.get(path).cloned().unwrap_or_default();
        let skip = entries.len().saturating_sub(n);
        Ok(entries.into_iter().skip(skip).collect())
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), WriteError> {
        if self.failing.contains(path) {
            return Err(WriteError::Status {
                status: 401,
                body: "Permission denied".to_string(),
            });
        }
        self.writes.lock().unwrap().push((path.to_string(), value));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    charts: Mutex<Vec<RenderedChart>>,
}

impl RecordingSink {
    pub fn charts(&self) -> Vec<RenderedChart> {
        self.charts.lock().unwrap().clone()
    }

    pub fn chart(&self, target_id: &str) -> Option<RenderedChart> {
        self.charts()
            .into_iter()
            .find(|c| c.target_id == target_id)
    }
}

#[async_trait]
impl ChartSink for RecordingSink {
    async fn render(&self, chart: RenderedChart) {
        self.charts.lock().unwrap().push(chart);
    }
}
