use crux_core::{render::render, Command};

use crate::events::Event;
use crate::http_helpers::STATUS_ENDPOINT;
use crate::http_text;
use crate::model::Model;
use crate::types::{PollingState, StatusReport};
use crate::{Effect, PollCmd};

const REFRESH_ACTION: &str = "Refresh status";

/// Handle status refresh and poll scheduling events
pub fn handle(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Refresh => refresh(),

        Event::StartPolling { interval_ms } => {
            model.polling = PollingState::Active { interval_ms };
            Command::all([
                render(),
                PollCmd::start(interval_ms)
                    .build()
                    .then_send(Event::PollResponse),
            ])
        }

        Event::StopPolling => {
            model.polling = PollingState::Stopped;
            Command::all([
                render(),
                PollCmd::stop().build().then_send(Event::PollResponse),
            ])
        }

        // A tick that arrives after polling was stopped is stale
        Event::PollTick => {
            if model.polling.is_active() {
                refresh()
            } else {
                log::debug!("ignoring poll tick while polling is stopped");
                Command::done()
            }
        }

        Event::PollResponse(output) => {
            log::debug!("poll schedule confirmed: {output:?}");
            Command::done()
        }

        Event::StatusResponse(result) => handle_status_response(result, model),

        _ => unreachable!("Non-status event passed to status handler"),
    }
}

fn refresh() -> Command<Effect, Event> {
    http_text!(get, STATUS_ENDPOINT, StatusResponse, REFRESH_ACTION)
}

/// Apply a status payload; responses are applied in arrival order.
///
/// Refresh outcomes only touch `refresh_error`, so a save in flight keeps its
/// loading flag and its own error or success message.
fn handle_status_response(
    result: Result<String, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let parsed = result.and_then(|body| {
        if model.view_state.debug_enabled {
            log::info!("status payload: {body}");
        }
        StatusReport::from_json(&body).map_err(|e| format!("{REFRESH_ACTION}: {e}"))
    });

    match parsed {
        Ok(report) => {
            model.apply_report(report);
            model.refresh_error = None;
            render()
        }
        Err(e) => {
            log::warn!("{e}");
            model.refresh_error = Some(e);
            render()
        }
    }
}
