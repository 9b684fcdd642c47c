use crate::detector::detection_report::DetectionReport;
use crate::error::Result as AgentErrorResult;

use ph_config::Config;
use ph_core::ProfileSource;

use log::{info, warn};

/// Counts live, non-special profiles against a threshold.
pub struct Detector<'a> {
    profiles: &'a dyn ProfileSource,
    threshold: u32,
}

impl<'a> Detector<'a> {
    pub fn new(config: &Config, profiles: &'a dyn ProfileSource) -> Self {
        Self {
            profiles,
            threshold: config.detector.profile_threshold,
        }
    }

    pub fn with_threshold(mut self, threshold: Option<u32>) -> Self {
        if let Some(threshold) = threshold {
            self.threshold = threshold;
        }
        self
    }

    pub fn run(&self) -> AgentErrorResult<DetectionReport> {
        let count = self
            .profiles
            .list_profiles()?
            .iter()
            .filter(|profile| !profile.special)
            .count();

        let report = DetectionReport::new(count, self.threshold);
        if report.exceeded {
            warn!("{}", report.message());
        } else {
            info!("{}", report.message());
        }

        Ok(report)
    }
}
