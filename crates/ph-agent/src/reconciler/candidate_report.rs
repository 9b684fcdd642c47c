use crate::reconciler::step_outcome::{RemovalStep, StepResult};

use ph_core::Sid;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Success,
    Partial,
    Simulated,
}

/// One stale profile and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateReport {
    pub identity: Sid,
    pub username: String,
    pub last_logon: String,
    /// Whole days between the last logon and the run
    pub days_inactive: i64,
    pub profile_path: String,
    pub size_bytes: u64,
    pub status: CandidateStatus,
    pub steps: Vec<StepResult>,
    pub failed_steps: Vec<RemovalStep>,
}

impl CandidateReport {
    pub fn step(&self, step: RemovalStep) -> Option<&StepResult> {
        self.steps.iter().find(|result| result.step == step)
    }
}
