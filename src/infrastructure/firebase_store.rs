// Realtime database store over its REST API
use crate::application::sensor_store::{RetrievalError, SensorStore, WriteError};
use crate::domain::series::RawEntry;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    pub fn new(
        base_url: String,
        auth_token: Option<String>,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    fn node_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }

    fn build_last_n_url(&self, path: &str, n: usize) -> String {
        let mut url = format!(
            "{}?orderBy={}&limitToLast={}",
            self.node_url(path),
            urlencoding::encode("\"$key\""),
            n
        );
        if let Some(token) = &self.auth_token {
            url.push_str("&auth=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }

    fn build_write_url(&self, path: &str) -> String {
        match &self.auth_token {
            Some(token) => format!("{}?auth={}", self.node_url(path), urlencoding::encode(token)),
            None => self.node_url(path),
        }
    }
}

/// Turn a node snapshot into entries in key order.
///
/// Keys use an ASCII-ordered alphabet, so sorting them is chronological.
/// Payloads that are not numbers become NaN, which no plausible range accepts.
fn parse_snapshot(body: Value) -> Result<Vec<RawEntry>, RetrievalError> {
    let children: BTreeMap<String, Value> = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map.into_iter().collect(),
        other => {
            return Err(RetrievalError::Body(format!(
                "expected an object of readings, got {}",
                other
            )));
        }
    };

    Ok(children
        .into_iter()
        .map(|(id, value)| {
            let payload = value.as_f64().unwrap_or_else(|| {
                tracing::debug!("Non-numeric reading at {}: {}", id, value);
                f64::NAN
            });
            RawEntry::new(id, payload)
        })
        .collect())
}

#[async_trait]
impl SensorStore for FirebaseStore {
    async fn get_last_n(&self, path: &str, n: usize) -> Result<Vec<RawEntry>, RetrievalError> {
        let url = self.build_last_n_url(path, n);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| RetrievalError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Status { status, body });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| RetrievalError::Body(e.to_string()))?;

        parse_snapshot(body)
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), WriteError> {
        let url = self.build_write_url(path);

        let response = self
            .client
            .put(&url)
            .json(&value)
            .send()
            .await
            .map_err(|e| WriteError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WriteError::Status { status, body });
        }

        Ok(())
    }
}
