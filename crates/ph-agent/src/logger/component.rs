use std::fmt;

/// A component that owns its own audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Seeder,
    Tracker,
    Reconciler,
    Validator,
    Detector,
    Installer,
}

impl Component {
    pub fn name(self) -> &'static str {
        match self {
            Self::Seeder => "seeder",
            Self::Tracker => "tracker",
            Self::Reconciler => "reconciler",
            Self::Validator => "validator",
            Self::Detector => "detector",
            Self::Installer => "installer",
        }
    }

    pub fn log_file_name(self) -> String {
        format!("{}.log", self.name())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
