use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (debug toggle, panel, clear messages)
pub fn handle(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::ToggleDebugLogging => {
            let enabled = !model.view_state.debug_enabled;
            model.view_state.debug_enabled = enabled;
            model.success_message = Some(format!("Debug enabled: {enabled}"));
            render()
        }

        Event::TogglePanelVisibility => {
            model.panel_visible = !model.panel_visible;
            // Opening the panel shows the latest cached values, unless the
            // inputs hold unsaved edits.
            if model.panel_visible && !model.view_state.editing {
                model.reset_form();
            }
            render()
        }

        Event::ClearError => update_field!(
            model.error_message, None;
            model.refresh_error, None
        ),
        Event::ClearSuccess => update_field!(model.success_message, None),
        _ => unreachable!("Non-UI event passed to UI handler"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_toggle_flips_and_notifies() {
        let mut model = Model::default();

        let _ = handle(Event::ToggleDebugLogging, &mut model);
        assert!(model.view_state.debug_enabled);
        assert_eq!(model.success_message.as_deref(), Some("Debug enabled: true"));

        let _ = handle(Event::ToggleDebugLogging, &mut model);
        assert!(!model.view_state.debug_enabled);
        assert_eq!(
            model.success_message.as_deref(),
            Some("Debug enabled: false")
        );
    }

    #[test]
    fn panel_visibility_follows_toggle() {
        let mut model = Model::default();

        let _ = handle(Event::TogglePanelVisibility, &mut model);
        assert!(model.panel_visible);

        let _ = handle(Event::TogglePanelVisibility, &mut model);
        assert!(!model.panel_visible);
    }

    #[test]
    fn opening_panel_keeps_unsaved_edits() {
        let mut model = Model::default();
        model.view_state.cached.ssid = "home".to_string();
        model.view_state.editing = true;
        model.form.ssid = "typing".to_string();

        let _ = handle(Event::TogglePanelVisibility, &mut model);

        assert_eq!(model.form.ssid, "typing");
    }

    #[test]
    fn opening_panel_shows_cached_values() {
        let mut model = Model::default();
        model.view_state.cached.ssid = "home".to_string();

        let _ = handle(Event::TogglePanelVisibility, &mut model);

        assert_eq!(model.form.ssid, "home");
    }

    #[test]
    fn clear_messages() {
        let mut model = Model {
            error_message: Some("Some error".to_string()),
            refresh_error: Some("Refresh status failed: Timeout".to_string()),
            success_message: Some("Saved".to_string()),
            ..Default::default()
        };

        let _ = handle(Event::ClearError, &mut model);
        let _ = handle(Event::ClearSuccess, &mut model);

        assert_eq!(model.error_message, None);
        assert_eq!(model.refresh_error, None);
        assert_eq!(model.success_message, None);
    }
}
