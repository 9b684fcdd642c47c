use crate::reconciler::{candidate_report::CandidateReport, skip_reason::SkippedRecord};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub dry_run: bool,
    pub days_threshold: u32,
    /// Local wall-clock cut-off; records at or after it are kept.
    pub threshold_instant: String,
    pub candidates: Vec<CandidateReport>,
    pub skipped: Vec<SkippedRecord>,
    pub summary: ReconcileSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub scanned: usize,
    /// Stale records that passed every check, i.e. the candidates.
    pub stale: usize,
    pub removed: usize,
    pub partial: usize,
    pub skipped: usize,
    pub reclaimed_bytes: u64,
    pub elapsed_ms: u64,
}
