use serde::{Deserialize, Serialize};

use super::common::string_or_number;

/// Live sensor and actuator readings reported by the device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceStatus {
    pub relay: String,
    pub motion: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Standard deviation of the recent temperature readings
    pub std_dev: f64,
}

/// Device configuration as reported in the `configuration` object of `/status`
///
/// The firmware sends `tolerance` and `delay` either as JSON strings or as
/// numbers; both are held as text because they are edited as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfig {
    pub version: String,
    #[serde(deserialize_with = "string_or_number")]
    pub tolerance: String,
    #[serde(deserialize_with = "string_or_number")]
    pub delay: String,
    pub ssid: String,
    pub password: String,
}

/// Body of `GET /status`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusReport {
    #[serde(flatten)]
    pub status: DeviceStatus,
    pub configuration: DeviceConfig,
}

impl StatusReport {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid status payload: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_config_values() {
        let report = StatusReport::from_json(
            r#"{"relay":"ON","motion":"none","temperature":21.5,"std_dev":0.3,
                "configuration":{"version":"1.2","tolerance":"5","delay":"1000",
                "ssid":"home","password":"secret"}}"#,
        )
        .unwrap();

        assert_eq!(report.status.relay, "ON");
        assert_eq!(report.status.temperature, 21.5);
        assert_eq!(report.configuration.tolerance, "5");
        assert_eq!(report.configuration.delay, "1000");
        assert_eq!(report.configuration.password, "secret");
    }

    #[test]
    fn parses_numeric_config_values() {
        let report = StatusReport::from_json(
            r#"{"relay":"OFF","motion":"detected","temperature":-3,"std_dev":1.25,
                "configuration":{"version":"2.0","tolerance":7,"delay":250.5,
                "ssid":"lab","password":""}}"#,
        )
        .unwrap();

        assert_eq!(report.status.temperature, -3.0);
        assert_eq!(report.configuration.tolerance, "7");
        assert_eq!(report.configuration.delay, "250.5");
    }

    #[test]
    fn rejects_missing_configuration() {
        let err = StatusReport::from_json(
            r#"{"relay":"ON","motion":"none","temperature":21.5,"std_dev":0.3}"#,
        )
        .unwrap_err();

        assert!(err.starts_with("invalid status payload"));
        assert!(err.contains("configuration"));
    }

    #[test]
    fn rejects_wrongly_typed_temperature() {
        assert!(StatusReport::from_json(
            r#"{"relay":"ON","motion":"none","temperature":"warm","std_dev":0.3,
                "configuration":{"version":"1","tolerance":"5","delay":"1",
                "ssid":"a","password":"b"}}"#,
        )
        .is_err());
    }
}
