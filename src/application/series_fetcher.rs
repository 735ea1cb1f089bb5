// Series fetcher - last N readings of a channel, decoded and range checked
use crate::application::sensor_store::{RetrievalError, SensorStore};
use crate::domain::channel::ChannelSpec;
use crate::domain::identifier::{self, LabelZone};
use crate::domain::series::{DecodedSample, RawEntry, Series};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct SeriesFetcher {
    store: Arc<dyn SensorStore>,
    device_id: String,
    label_zone: LabelZone,
    timeout: Option<Duration>,
}

impl SeriesFetcher {
    pub fn new(
        store: Arc<dyn SensorStore>,
        device_id: String,
        label_zone: LabelZone,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            store,
            device_id,
            label_zone,
            timeout,
        }
    }

    pub async fn fetch(&self, spec: &ChannelSpec) -> Result<Series, RetrievalError> {
        let path = spec.store_path(&self.device_id);
        let request = self.store.get_last_n(&path, spec.sample_count);

        let entries = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| RetrievalError::Timeout(limit))??,
            None => request.await?,
        };

        tracing::debug!("Fetched {} entries from {}", entries.len(), path);
        Ok(self.shape(spec, entries))
    }

    /// Every entry keeps its slot: rejected readings become gaps and
    /// undecodable keys get an empty label.
    fn shape(&self, spec: &ChannelSpec, entries: Vec<RawEntry>) -> Series {
        let mut series = Series::with_capacity(entries.len());

        for entry in entries {
            let (timestamp, label) = match identifier::decode(&entry.id) {
                Ok(at) => (Some(at), self.label_zone.format(&at)),
                Err(e) => {
                    tracing::warn!("Unlabelled {} sample: {}", spec.key, e);
                    (None, String::new())
                }
            };

            let value = if spec.valid_range.accepts(entry.payload) {
                Some(entry.payload)
            } else {
                tracing::debug!(
                    "{} reading {} at {} outside plausible range",
                    spec.key,
                    entry.payload,
                    entry.id
                );
                None
            };

            series.push(DecodedSample {
                timestamp,
                label,
                value,
            });
        }

        series
    }
}
