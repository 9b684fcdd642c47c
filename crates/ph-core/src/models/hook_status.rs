use serde::{Deserialize, Serialize};

const DISABLED_STATE: &str = "Disabled";

/// Registration state of the logon hook as reported by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookStatus {
    pub name: String,
    pub enabled: bool,
    /// Scheduler state text, e.g. `Ready`, `Running`, `Disabled`.
    pub state: String,
}

impl HookStatus {
    pub fn is_runnable(&self) -> bool {
        self.enabled && !self.state.eq_ignore_ascii_case(DISABLED_STATE)
    }
}
