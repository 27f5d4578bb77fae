//! Line-based user interface: commands in, rendered panel out.

use crate::shell::ShellMessage;
use log::{error, info, warn};
use panel_sync_core::{Event, SettingsField, ViewModel};
use std::fmt::Write;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc::UnboundedSender,
};

pub const USAGE: &str = "commands: edit | save | cancel | set <tolerance|delay|ssid|password> <value> \
| refresh | debug | panel | start [ms] | stop | clear | quit";

/// What a single input line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Event(Event),
    Clear,
    Quit,
}

/// Parse one input line
///
/// `start` without an interval uses `default_interval_ms`.
pub fn parse_command(line: &str, default_interval_ms: u64) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match command {
        "edit" | "save" => Event::ToggleEditing,
        "cancel" => Event::CancelEditing,
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            Event::EditField {
                field: field.parse::<SettingsField>()?,
                value: value.trim().to_string(),
            }
        }
        "refresh" => Event::Refresh,
        "debug" => Event::ToggleDebugLogging,
        "panel" => Event::TogglePanelVisibility,
        "start" => {
            let interval_ms = if rest.is_empty() {
                default_interval_ms
            } else {
                rest.parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| format!("invalid interval: {rest}"))?
            };
            Event::StartPolling { interval_ms }
        }
        "stop" => Event::StopPolling,
        "clear" => return Ok(ConsoleCommand::Clear),
        "quit" | "exit" => return Ok(ConsoleCommand::Quit),
        "" => return Err(USAGE.to_string()),
        other => return Err(format!("unknown command: {other}\n{USAGE}")),
    };

    Ok(ConsoleCommand::Event(event))
}

/// Forward input lines to the shell loop until `quit` or end of input.
///
/// Only `quit` stops the shell. Closed or unreadable input just ends command
/// handling; polling keeps running until Ctrl-C.
pub async fn forward_commands<R>(
    input: R,
    tx: UnboundedSender<ShellMessage>,
    default_interval_ms: u64,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("input closed, continuing without commands");
                return;
            }
            Err(e) => {
                error!("failed to read input: {e:#}");
                return;
            }
        };

        match parse_command(&line, default_interval_ms) {
            Ok(ConsoleCommand::Event(event)) => send(&tx, event),
            Ok(ConsoleCommand::Clear) => {
                send(&tx, Event::ClearError);
                send(&tx, Event::ClearSuccess);
            }
            Ok(ConsoleCommand::Quit) => {
                let _ = tx.send(ShellMessage::Quit);
                return;
            }
            Err(hint) => println!("{hint}"),
        }
    }
}

fn send(tx: &UnboundedSender<ShellMessage>, event: Event) {
    if tx.send(ShellMessage::Event(event)).is_err() {
        warn!("shell loop is gone, dropping event");
    }
}

/// Format the view model as a text panel
pub fn render(view: &ViewModel) -> String {
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "relay: {}  motion: {}", view.relay, view.motion);
    let _ = writeln!(
        out,
        "temperature: {}  std dev: {}",
        view.temperature, view.std_dev
    );
    let _ = writeln!(out, "version: {}", view.version);

    if view.panel_visible {
        let state = if view.inputs_enabled { "editable" } else { "locked" };
        let _ = writeln!(out, "settings ({state}):");
        let _ = writeln!(out, "  tolerance: {}", view.form.tolerance);
        let _ = writeln!(out, "  delay:     {}", view.form.delay);
        let _ = writeln!(out, "  ssid:      {}", view.form.ssid);
        let _ = writeln!(out, "  password:  {}", view.form.password);
        let mut buttons = format!("[{}]", view.action_label);
        if view.cancel_visible {
            buttons.push_str(" [Cancel]");
        }
        let _ = writeln!(out, "{buttons}");
    }

    if !view.polling {
        let _ = writeln!(out, "(polling stopped)");
    }
    if let Some(message) = &view.success_message {
        let _ = writeln!(out, "> {message}");
    }
    if let Some(error) = &view.error_message {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(error) = &view.refresh_error {
        let _ = writeln!(out, "! {error}");
    }

    out
}
