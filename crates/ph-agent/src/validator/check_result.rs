use serde::Serialize;

pub const STORE_ROOT_CHECK: &str = "store root";
pub const TRACKER_ARTIFACT_CHECK: &str = "tracker artifact";
pub const VERSION_MARKER_CHECK: &str = "version marker";
pub const LOGON_HOOK_CHECK: &str = "logon hook";
pub const PROFILE_RECORDS_CHECK: &str = "profile records";
pub const TRACKER_HEALTH_CHECK: &str = "tracker health";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    /// Informational checks are reported but do not decide compliance.
    pub mandatory: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn pass(name: &'static str, mandatory: bool, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            mandatory,
            detail: detail.into(),
        }
    }

    pub fn fail(name: &'static str, mandatory: bool, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            mandatory,
            detail: detail.into(),
        }
    }
}
