mod settings;
mod status;
mod ui;

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::types::DEFAULT_POLL_INTERVAL_MS;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        // Initialization: start polling and fetch right away
        Event::Initialize => Command::all([
            render(),
            status::handle(
                Event::StartPolling {
                    interval_ms: DEFAULT_POLL_INTERVAL_MS,
                },
                model,
            ),
            status::handle(Event::Refresh, model),
        ]),

        // Status domain
        Event::Refresh
        | Event::StartPolling { .. }
        | Event::StopPolling
        | Event::PollTick
        | Event::PollResponse(_)
        | Event::StatusResponse(_) => status::handle(event, model),

        // Settings domain
        Event::ToggleEditing
        | Event::CancelEditing
        | Event::EditField { .. }
        | Event::UpdateResponse(_) => settings::handle(event, model),

        // UI actions domain
        Event::ToggleDebugLogging
        | Event::TogglePanelVisibility
        | Event::ClearError
        | Event::ClearSuccess => ui::handle(event, model),
    }
}
