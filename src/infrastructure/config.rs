use crate::domain::identifier::LabelZone;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub device: DeviceSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub labels: LabelSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub base_url: String,
    pub auth_token: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceSettings {
    pub id: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self { id: "0".to_string() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PipelineSettings {
    /// Bounded wait per channel fetch; unbounded when absent.
    pub fetch_timeout_secs: Option<u64>,
}

impl PipelineSettings {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LabelSettings {
    pub timezone: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
        }
    }
}

impl LabelSettings {
    pub fn zone(&self) -> anyhow::Result<LabelZone> {
        self.timezone.parse().map_err(anyhow::Error::msg)
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config = parse(
            r#"
            [store]
            base_url = "https://crop-monitor.example.firebaseio.com"
            "#,
        );

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.device.id, "0");
        assert_eq!(config.store.request_timeout_secs, 10);
        assert!(config.store.auth_token.is_none());
        assert!(config.pipeline.fetch_timeout().is_none());
        assert_eq!(config.labels.zone().unwrap(), LabelZone::Local);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            [server]
            bind_addr = "127.0.0.1:9000"

            [store]
            base_url = "https://crop-monitor.example.firebaseio.com/"
            auth_token = "secret"
            request_timeout_secs = 3

            [device]
            id = "2"

            [pipeline]
            fetch_timeout_secs = 5

            [labels]
            timezone = "utc"
            "#,
        );

        assert_eq!(config.device.id, "2");
        assert_eq!(config.store.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.pipeline.fetch_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.labels.zone().unwrap(), LabelZone::Utc);
    }

    #[test]
    fn test_bad_timezone_is_an_error() {
        let labels = LabelSettings {
            timezone: "somewhere".to_string(),
        };
        assert!(labels.zone().is_err());
    }
}
