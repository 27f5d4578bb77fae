use serde::{Deserialize, Serialize};

/// Interval used when polling is started by `Event::Initialize`
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Whether the shell is currently delivering poll ticks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum PollingState {
    #[default]
    Stopped,
    Active {
        interval_ms: u64,
    },
}

impl PollingState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}
