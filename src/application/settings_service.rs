// Settings service - Use case for writing device configuration
use crate::application::sensor_store::{SensorStore, WriteError};
use crate::domain::channel::device_path;
use crate::domain::settings::DeviceCommand;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("selection is not valid for {0:?}")]
    InvalidSelection(DeviceCommand),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SensorStore>,
    device_id: String,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SensorStore>, device_id: String) -> Self {
        Self { store, device_id }
    }

    /// Apply a command, returning the paths written.
    pub async fn apply(&self, command: DeviceCommand) -> Result<Vec<String>, SettingsError> {
        let writes = command
            .writes()
            .ok_or_else(|| SettingsError::InvalidSelection(command.clone()))?;

        let mut written = Vec::with_capacity(writes.len());
        for (key, value) in writes {
            let path = device_path(&self.device_id, key);
            tracing::info!("Writing {} = {}", path, value);
            self.store.set(&path, value).await?;
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeStore;
    use crate::domain::settings::OutputVariable;
    use serde_json::json;

    #[tokio::test]
    async fn test_relay_on_writes_state_then_disables_auto() {
        let store = Arc::new(FakeStore::new());
        let service = SettingsService::new(store.clone(), "0".to_string());

        let written = service.apply(DeviceCommand::RelayOn).await.unwrap();

        assert_eq!(written, vec!["devices/0/relay-state", "devices/0/relay-en"]);
        assert_eq!(
            store.writes(),
            vec![
                ("devices/0/relay-state".to_string(), json!(true)),
                ("devices/0/relay-en".to_string(), json!(false)),
            ]
        );
    }

    #[tokio::test]
    async fn test_output_variable_written_as_integer() {
        let store = Arc::new(FakeStore::new());
        let service = SettingsService::new(store.clone(), "3".to_string());

        service
            .apply(DeviceCommand::SetOutputVariable(OutputVariable::SoilMoisture))
            .await
            .unwrap();

        assert_eq!(store.writes(), vec![("devices/3/output-var".to_string(), json!(5))]);
    }

    #[tokio::test]
    async fn test_invalid_module_selection_writes_nothing() {
        let store = Arc::new(FakeStore::new());
        let service = SettingsService::new(store.clone(), "0".to_string());

        let result = service.apply(DeviceCommand::SetOutputModuleState(7)).await;

        assert!(matches!(result, Err(SettingsError::InvalidSelection(_))));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_write_is_reported() {
        let store = Arc::new(FakeStore::new().failing("devices/0/buzzer-en"));
        let service = SettingsService::new(store, "0".to_string());

        let result = service.apply(DeviceCommand::SetBuzzerEnabled(true)).await;

        assert!(matches!(
            result,
            Err(SettingsError::Write(WriteError::Status { status: 401, .. }))
        ));
    }
}
