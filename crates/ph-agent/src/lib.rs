pub mod detector;
pub mod disk_usage;
pub mod error;
pub mod installer;
pub mod logger;
pub mod reconciler;
pub mod seeder;
pub mod system;
pub mod tracker;
pub mod validator;

#[cfg(test)]
mod tests;

pub use detector::{detection_report::DetectionReport, detector::Detector};
pub use disk_usage::directory_size;
pub use error::{AgentError, Result};
pub use installer::{
    install_report::{
        InstallAction, InstallReport, InstallStep, InstallStepOutcome, InstallStepResult,
    },
    installer::Installer,
};
pub use logger::{LogTarget, component::Component};
pub use reconciler::{
    candidate_report::{CandidateReport, CandidateStatus},
    reconcile_options::ReconcileOptions,
    reconcile_report::{ReconcileReport, ReconcileSummary},
    reconciler::Reconciler,
    skip_reason::{SkipReason, SkippedRecord},
    step_outcome::{RemovalStep, StepOutcome, StepResult},
};
pub use seeder::{
    seed_report::{SeedEntry, SeedFailure, SeedReport, SeedSkip, SeedSkipReason, TimestampSource},
    seeder::Seeder,
};
pub use system::SystemBackend;
pub use tracker::{track_outcome::TrackOutcome, tracker::Tracker, tracker_health::TrackerHealth};
pub use validator::{
    check_result::{
        CheckResult, LOGON_HOOK_CHECK, PROFILE_RECORDS_CHECK, STORE_ROOT_CHECK,
        TRACKER_ARTIFACT_CHECK, TRACKER_HEALTH_CHECK, VERSION_MARKER_CHECK,
    },
    validation_report::ValidationReport,
    validator::Validator,
};

/// Written to the store root as the version marker.
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");
