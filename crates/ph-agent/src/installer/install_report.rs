use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallAction {
    Install,
    Uninstall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStep {
    VersionMarker,
    TrackerArtifact,
    LogonHook,
    Seed,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InstallStepOutcome {
    Done { detail: String },
    Skipped { detail: String },
    NotFound,
    Simulated { detail: String },
    Failed { error: String },
}

impl InstallStepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStepResult {
    pub step: InstallStep,
    #[serde(flatten)]
    pub outcome: InstallStepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub action: InstallAction,
    pub what_if: bool,
    pub steps: Vec<InstallStepResult>,
}

impl InstallReport {
    pub fn new(action: InstallAction, what_if: bool) -> Self {
        Self {
            action,
            what_if,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: InstallStep, outcome: InstallStepOutcome) {
        self.steps.push(InstallStepResult { step, outcome });
    }

    pub fn step(&self, step: InstallStep) -> Option<&InstallStepOutcome> {
        self.steps
            .iter()
            .find(|result| result.step == step)
            .map(|result| &result.outcome)
    }

    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|result| !result.outcome.is_failure())
    }
}
