use serde::Serialize;
use serde_json::Value;

pub const EXIT_OK: u8 = 0;
/// Non-compliant, threshold exceeded, or a failed reconciliation.
pub const EXIT_FINDING: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// JSON printed on stdout and the exit code that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub exit_code: u8,
    pub body: Value,
}

impl CommandOutput {
    pub fn new<T: Serialize>(exit_code: u8, body: &T) -> serde_json::Result<Self> {
        Ok(Self {
            exit_code,
            body: serde_json::to_value(body)?,
        })
    }

    pub fn render(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(&self.body)
        } else {
            serde_json::to_string(&self.body)
        }
    }
}
