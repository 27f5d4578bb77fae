use crux_core::{render::render, Command};

use crate::events::Event;
use crate::handle_request_error;
use crate::http_helpers::UPDATE_ENDPOINT;
use crate::http_text;
use crate::model::Model;
use crate::types::SettingsUpdate;
use crate::Effect;

const SAVE_ACTION: &str = "Save settings";

/// Handle settings form events (edit mode, field input, save, cancel)
pub fn handle(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::ToggleEditing => {
            if model.view_state.editing {
                model.view_state.editing = false;
                submit(model)
            } else {
                model.view_state.editing = true;
                render()
            }
        }

        Event::CancelEditing => {
            if !model.view_state.editing {
                return Command::done();
            }
            model.view_state.editing = false;
            model.reset_form();
            render()
        }

        Event::EditField { field, value } => {
            if !model.view_state.editing {
                log::debug!("ignoring input for {field:?} outside of edit mode");
                return Command::done();
            }
            model.form.set(field, value);
            render()
        }

        Event::UpdateResponse(result) => match result {
            Ok(text) => {
                model.stop_loading();
                model.success_message = Some(text);
                render()
            }
            Err(e) => {
                log::warn!("{e}");
                model.set_error_and_render(e)
            }
        },

        _ => unreachable!("Non-settings event passed to settings handler"),
    }
}

/// Post the visible form values verbatim
fn submit(model: &mut Model) -> Command<Effect, Event> {
    let update = SettingsUpdate::from(&model.form);

    match http_text!(post, UPDATE_ENDPOINT, UpdateResponse, SAVE_ACTION, body_form: &update) {
        Ok(request) => {
            model.start_loading();
            Command::all([render(), request])
        }
        Err(e) => handle_request_error(model, SAVE_ACTION, e),
    }
}
