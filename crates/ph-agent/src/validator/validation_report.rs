use crate::validator::check_result::CheckResult;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub compliant: bool,
    pub checks: Vec<CheckResult>,
    pub failed_checks: Vec<&'static str>,
}

impl ValidationReport {
    pub fn from_checks(checks: Vec<CheckResult>) -> Self {
        let compliant = checks
            .iter()
            .filter(|check| check.mandatory)
            .all(|check| check.passed);
        let failed_checks = checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.name)
            .collect();

        Self {
            compliant,
            checks,
            failed_checks,
        }
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.name == name)
    }
}
