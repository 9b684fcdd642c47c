pub mod candidate_report;
pub mod reconcile_options;
pub mod reconcile_report;
pub mod reconciler;
pub mod skip_reason;
pub mod step_outcome;
