use serde::{Deserialize, Serialize};

use super::common::NOT_SET;
use super::device::DeviceConfig;

/// Editable settings input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SettingsField {
    Tolerance,
    Delay,
    Ssid,
    Password,
}

impl std::str::FromStr for SettingsField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tolerance" => Ok(Self::Tolerance),
            "delay" => Ok(Self::Delay),
            "ssid" => Ok(Self::Ssid),
            "password" => Ok(Self::Password),
            other => Err(format!("unknown settings field: {other}")),
        }
    }
}

/// Values currently shown in the settings inputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsForm {
    pub tolerance: String,
    pub delay: String,
    pub ssid: String,
    pub password: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            tolerance: NOT_SET.to_string(),
            delay: NOT_SET.to_string(),
            ssid: NOT_SET.to_string(),
            password: NOT_SET.to_string(),
        }
    }
}

impl SettingsForm {
    pub fn set(&mut self, field: SettingsField, value: String) {
        match field {
            SettingsField::Tolerance => self.tolerance = value,
            SettingsField::Delay => self.delay = value,
            SettingsField::Ssid => self.ssid = value,
            SettingsField::Password => self.password = value,
        }
    }
}

/// Client-side cache of the last fetched configuration plus the mode flags
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewState {
    /// Last fetched configuration values, independent of the visible inputs
    pub cached: SettingsForm,
    pub editing: bool,
    pub debug_enabled: bool,
}

impl ViewState {
    /// Store freshly fetched configuration and return whether the visible
    /// form may follow it.
    pub fn cache(&mut self, config: &DeviceConfig) -> bool {
        self.cached = SettingsForm::from(config);
        !self.editing
    }
}

impl From<&DeviceConfig> for SettingsForm {
    fn from(config: &DeviceConfig) -> Self {
        Self {
            tolerance: config.tolerance.clone(),
            delay: config.delay.clone(),
            ssid: config.ssid.clone(),
            password: config.password.clone(),
        }
    }
}

/// Form body of `POST /update`
///
/// The firmware expects `wait` for the delay and `pass` for the password,
/// which differ from the names it uses in `/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub tolerance: String,
    pub wait: String,
    pub ssid: String,
    pub pass: String,
}

impl From<&SettingsForm> for SettingsUpdate {
    fn from(form: &SettingsForm) -> Self {
        Self {
            tolerance: form.tolerance.clone(),
            wait: form.delay.clone(),
            ssid: form.ssid.clone(),
            pass: form.password.clone(),
        }
    }
}
