use serde::{Deserialize, Serialize};

use crate::types::*;

/// Trait for types that can handle error messages
///
/// This allows HTTP helper functions to work with Model without directly depending on it.
pub trait ModelErrorHandler {
    fn set_error(&mut self, error: String);
}

/// Application Model - the complete state
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct Model {
    // Device state (absent until the first successful refresh)
    pub status: Option<DeviceStatus>,
    pub version: Option<String>,

    // Cached configuration and mode flags
    pub view_state: ViewState,

    // Visible settings inputs
    pub form: SettingsForm,

    // Poll scheduling
    pub polling: PollingState,

    // UI state
    pub panel_visible: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // Last failed background refresh, independent of the save state above
    pub refresh_error: Option<String>,
}

impl Model {
    /// Copy the cached configuration into the visible inputs
    pub fn reset_form(&mut self) {
        self.form = self.view_state.cached.clone();
    }

    /// Apply a freshly fetched report: status and cache always, inputs only
    /// outside of edit mode.
    pub fn apply_report(&mut self, report: StatusReport) {
        let StatusReport {
            status,
            configuration,
        } = report;

        if self.view_state.cache(&configuration) {
            self.reset_form();
        }
        self.version = Some(configuration.version);
        self.status = Some(status);
    }

    /// Start a loading operation (sets is_loading=true, clears error)
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    /// Stop loading and clear error
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.error_message = None;
    }

    /// Set an error message and stop loading
    pub fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }

    /// Set an error message, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }
}

impl ModelErrorHandler for Model {
    fn set_error(&mut self, error: String) {
        Model::set_error(self, error)
    }
}

pub const EDIT_LABEL: &str = "Edit Settings";
pub const SAVE_LABEL: &str = "Save Settings";

/// What the shell renders
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub relay: String,
    pub motion: String,
    pub temperature: String,
    pub std_dev: String,
    pub version: String,

    pub form: SettingsForm,
    pub inputs_enabled: bool,
    pub action_label: String,
    pub action_visible: bool,
    pub cancel_visible: bool,
    pub panel_visible: bool,

    pub debug_enabled: bool,
    pub polling: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub refresh_error: Option<String>,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let (relay, motion, temperature, std_dev) = match &model.status {
            Some(status) => (
                status.relay.clone(),
                status.motion.clone(),
                format!("{}°C", status.temperature),
                status.std_dev.to_string(),
            ),
            None => Default::default(),
        };
        let editing = model.view_state.editing;

        Self {
            relay,
            motion,
            temperature,
            std_dev,
            version: model.version.clone().unwrap_or_default(),
            form: model.form.clone(),
            inputs_enabled: editing,
            action_label: if editing { SAVE_LABEL } else { EDIT_LABEL }.to_string(),
            action_visible: model.panel_visible,
            cancel_visible: model.panel_visible && editing,
            panel_visible: model.panel_visible,
            debug_enabled: model.view_state.debug_enabled,
            polling: model.polling.is_active(),
            is_loading: model.is_loading,
            error_message: model.error_message.clone(),
            success_message: model.success_message.clone(),
            refresh_error: model.refresh_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(tolerance: &str, temperature: f64) -> StatusReport {
        StatusReport {
            status: DeviceStatus {
                relay: "ON".to_string(),
                motion: "none".to_string(),
                temperature,
                std_dev: 0.3,
            },
            configuration: DeviceConfig {
                version: "1.2".to_string(),
                tolerance: tolerance.to_string(),
                delay: "1000".to_string(),
                ssid: "home".to_string(),
                password: "secret".to_string(),
            },
        }
    }

    #[test]
    fn apply_report_outside_edit_mode_syncs_form() {
        let mut model = Model::default();

        model.apply_report(report("5", 21.5));

        assert_eq!(model.form.tolerance, "5");
        assert_eq!(model.view_state.cached.tolerance, "5");
        assert_eq!(model.version.as_deref(), Some("1.2"));
    }

    #[test]
    fn apply_report_in_edit_mode_keeps_form() {
        let mut model = Model::default();
        model.apply_report(report("5", 21.5));
        model.view_state.editing = true;
        model.form.tolerance = "9".to_string();

        model.apply_report(report("6", 22.0));

        assert_eq!(model.form.tolerance, "9");
        assert_eq!(model.view_state.cached.tolerance, "6");
        assert_eq!(model.status.as_ref().map(|s| s.temperature), Some(22.0));
    }

    #[test]
    fn view_formats_status_and_buttons() {
        let mut model = Model {
            panel_visible: true,
            ..Default::default()
        };
        model.apply_report(report("5", 21.5));

        let view = ViewModel::from(&model);
        assert_eq!(view.temperature, "21.5°C");
        assert_eq!(view.std_dev, "0.3");
        assert_eq!(view.action_label, EDIT_LABEL);
        assert!(!view.inputs_enabled);
        assert!(!view.cancel_visible);

        model.view_state.editing = true;
        let view = ViewModel::from(&model);
        assert_eq!(view.action_label, SAVE_LABEL);
        assert!(view.inputs_enabled);
        assert!(view.cancel_visible);
    }

    #[test]
    fn hidden_panel_hides_buttons() {
        let model = Model {
            view_state: ViewState {
                editing: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let view = ViewModel::from(&model);
        assert!(!view.action_visible);
        assert!(!view.cancel_visible);
        assert_eq!(view.form.ssid, NOT_SET);
    }

    #[test]
    fn refresh_and_save_errors_are_shown_separately() {
        let model = Model {
            error_message: Some("Save settings failed: HTTP 500: flash busy".to_string()),
            refresh_error: Some("Refresh status failed: Timeout".to_string()),
            ..Default::default()
        };

        let view = ViewModel::from(&model);
        assert_eq!(
            view.error_message.as_deref(),
            Some("Save settings failed: HTTP 500: flash busy")
        );
        assert_eq!(
            view.refresh_error.as_deref(),
            Some("Refresh status failed: Timeout")
        );
    }
}
