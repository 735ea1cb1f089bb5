// Time series domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One stored reading as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub id: String,
    pub payload: f64,
}

impl RawEntry {
    pub fn new(id: impl Into<String>, payload: f64) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSample {
    /// `None` when the identifier could not be decoded.
    pub timestamp: Option<DateTime<Utc>>,
    pub label: String,
    /// `None` marks a reading rejected by range validation.
    pub value: Option<f64>,
}

/// Samples of one channel in store order, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub samples: Vec<DecodedSample>,
}

impl Series {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: DecodedSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

/// A series as handed to a chart, with its display options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub target_id: String,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}
