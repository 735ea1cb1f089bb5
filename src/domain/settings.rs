// Device settings written back to the store
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Quantity a device output (display, buzzer, relay) is driven by, as the
/// integer the firmware expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum OutputVariable {
    None = 0,
    AirTemperature = 1,
    AirHumidity = 2,
    AirPressure = 3,
    SoilTemperature = 4,
    SoilMoisture = 5,
    LeafMoisture = 6,
    LightIntensity = 7,
    UvIntensity = 8,
}

impl TryFrom<i64> for OutputVariable {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => OutputVariable::None,
            1 => OutputVariable::AirTemperature,
            2 => OutputVariable::AirHumidity,
            3 => OutputVariable::AirPressure,
            4 => OutputVariable::SoilTemperature,
            5 => OutputVariable::SoilMoisture,
            6 => OutputVariable::LeafMoisture,
            7 => OutputVariable::LightIntensity,
            8 => OutputVariable::UvIntensity,
            other => return Err(format!("unknown output variable {}", other)),
        })
    }
}

impl From<OutputVariable> for i64 {
    fn from(value: OutputVariable) -> Self {
        value as i64
    }
}

/// Operator action from the settings form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum DeviceCommand {
    SetOutputVariable(OutputVariable),
    /// Raw form selection; `1` switches the module off.
    SetOutputModuleState(i64),
    SetOutputThreshold(i64),
    SetBuzzerEnabled(bool),
    SetBuzzerVariable(OutputVariable),
    SetBuzzerThreshold(i64),
    SetRelayEnabled(bool),
    SetRelayVariable(OutputVariable),
    SetRelayThreshold(i64),
    RelayOn,
    RelayOff,
}

impl DeviceCommand {
    /// Field writes under the device namespace, in the order they are applied.
    /// `None` when the command carries a selection the device does not know.
    pub fn writes(&self) -> Option<Vec<(&'static str, Value)>> {
        let writes = match self {
            DeviceCommand::SetOutputVariable(v) => vec![("output-var", json!(i64::from(*v)))],
            DeviceCommand::SetOutputModuleState(selection) => {
                if !(0..=1).contains(selection) {
                    return None;
                }
                vec![("om-state", json!(*selection != 1))]
            }
            DeviceCommand::SetOutputThreshold(t) => vec![("output-threshold", json!(t))],
            DeviceCommand::SetBuzzerEnabled(on) => vec![("buzzer-en", json!(on))],
            DeviceCommand::SetBuzzerVariable(v) => vec![("buzzer-var", json!(i64::from(*v)))],
            DeviceCommand::SetBuzzerThreshold(t) => vec![("buzzer-threshold", json!(t))],
            DeviceCommand::SetRelayEnabled(on) => vec![("relay-en", json!(on))],
            DeviceCommand::SetRelayVariable(v) => vec![("relay-var", json!(i64::from(*v)))],
            DeviceCommand::SetRelayThreshold(t) => vec![("relay-threshold", json!(t))],
            // Manual relay control disables threshold switching.
            DeviceCommand::RelayOn => vec![("relay-state", json!(true)), ("relay-en", json!(false))],
            DeviceCommand::RelayOff => {
                vec![("relay-state", json!(false)), ("relay-en", json!(false))]
            }
        };
        Some(writes)
    }
}
