use serde::Serialize;

/// The three removals attempted for every candidate, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalStep {
    Account,
    Profile,
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    /// Profile registration removal failed but the directory tree was deleted.
    DirectoryRemoved { primary_error: String },
    NotFound,
    Simulated,
    Failed { error: String },
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub step: RemovalStep,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}
