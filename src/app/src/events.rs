use serde::{Deserialize, Serialize};

use crate::commands::poll::PollOutput;
use crate::types::*;

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    // Initialization
    Initialize,

    // Status refresh
    Refresh,
    StartPolling {
        interval_ms: u64,
    },
    StopPolling,
    PollTick,

    // Settings editing
    ToggleEditing,
    CancelEditing,
    EditField {
        field: SettingsField,
        value: String,
    },

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    StatusResponse(Result<String, String>),
    #[serde(skip)]
    UpdateResponse(Result<String, String>),

    // Shell confirmations (internal events)
    #[serde(skip)]
    PollResponse(PollOutput),

    // UI actions
    ToggleDebugLogging,
    TogglePanelVisibility,
    ClearError,
    ClearSuccess,
}
