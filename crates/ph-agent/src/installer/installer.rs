use crate::AGENT_VERSION;
use crate::installer::install_report::{
    InstallAction, InstallReport, InstallStep, InstallStepOutcome,
};
use crate::seeder::seeder::Seeder;

use ph_config::Config;
use ph_core::{LogonHook, ProfileSource};
use ph_db::{StoreConnection, StoreMetaRepository};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{error, info, warn};
use sqlx::SqlitePool;

const TRACKER_BINARY_STEM: &str = "logon-tracker";

/// Places and registers the tracker, then seeds the store; or undoes it.
///
/// Every step is attempted even when an earlier one failed.
pub struct Installer<'a> {
    config: &'a Config,
    profiles: &'a dyn ProfileSource,
    hook: &'a dyn LogonHook,
    tracker_source: Option<PathBuf>,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a Config, profiles: &'a dyn ProfileSource, hook: &'a dyn LogonHook) -> Self {
        Self {
            config,
            profiles,
            hook,
            tracker_source: Self::bundled_tracker(),
        }
    }

    /// Tracker executable to copy, instead of the one next to the running binary.
    pub fn with_tracker_source(mut self, source: PathBuf) -> Self {
        self.tracker_source = Some(source);
        self
    }

    pub async fn install(&self, what_if: bool, now: DateTime<Local>) -> InstallReport {
        info!("Install started (what_if={what_if})");
        let mut report = InstallReport::new(InstallAction::Install, what_if);

        let (outcome, pool) = self.write_version_marker(what_if).await;
        Self::record(&mut report, InstallStep::VersionMarker, outcome);

        let target = self.config.tracker_artifact_path();
        let outcome = self.place_tracker(&target, what_if);
        Self::record(&mut report, InstallStep::TrackerArtifact, outcome);

        let outcome = self.register_hook(&target, what_if);
        Self::record(&mut report, InstallStep::LogonHook, outcome);

        let outcome = self.seed(pool.as_ref(), what_if, now).await;
        Self::record(&mut report, InstallStep::Seed, outcome);

        if let Some(pool) = pool {
            pool.close().await;
        }

        info!("Install finished (succeeded={})", report.succeeded());
        report
    }

    pub async fn uninstall(&self, what_if: bool) -> InstallReport {
        info!("Uninstall started (what_if={what_if})");
        let mut report = InstallReport::new(InstallAction::Uninstall, what_if);

        let outcome = self.unregister_hook(what_if);
        Self::record(&mut report, InstallStep::LogonHook, outcome);

        let outcome = Self::remove_file(&self.config.tracker_artifact_path(), what_if);
        Self::record(&mut report, InstallStep::TrackerArtifact, outcome);

        let outcome = self.remove_store(what_if);
        Self::record(&mut report, InstallStep::Store, outcome);

        info!("Uninstall finished (succeeded={})", report.succeeded());
        report
    }

    fn bundled_tracker() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        let dir = exe.parent()?;
        Some(dir.join(format!(
            "{}{}",
            TRACKER_BINARY_STEM,
            std::env::consts::EXE_SUFFIX
        )))
    }

    fn record(report: &mut InstallReport, step: InstallStep, outcome: InstallStepOutcome) {
        match outcome {
            InstallStepOutcome::Failed { ref error } => error!("{step:?}: failed: {error}"),
            ref other => info!("{step:?}: {other:?}"),
        }
        report.push(step, outcome);
    }

    async fn write_version_marker(
        &self,
        what_if: bool,
    ) -> (InstallStepOutcome, Option<SqlitePool>) {
        let path = self.config.store_path();

        if what_if {
            return (
                InstallStepOutcome::Simulated {
                    detail: format!("would write version {AGENT_VERSION} to {}", path.display()),
                },
                None,
            );
        }

        let pool = match StoreConnection::open(&path).await {
            Ok(pool) => pool,
            Err(e) => {
                return (
                    InstallStepOutcome::Failed {
                        error: e.to_string(),
                    },
                    None,
                );
            }
        };

        let outcome = match StoreMetaRepository::set_version(&pool, AGENT_VERSION).await {
            Ok(()) => InstallStepOutcome::Done {
                detail: format!("version {AGENT_VERSION} at {}", path.display()),
            },
            Err(e) => InstallStepOutcome::Failed {
                error: e.to_string(),
            },
        };

        (outcome, Some(pool))
    }

    fn place_tracker(&self, target: &Path, what_if: bool) -> InstallStepOutcome {
        let Some(ref source) = self.tracker_source else {
            return InstallStepOutcome::Failed {
                error: "cannot locate the running executable".to_string(),
            };
        };

        if Self::same_file(source, target) {
            return InstallStepOutcome::Skipped {
                detail: format!("{} is already in place", target.display()),
            };
        }

        if what_if {
            return InstallStepOutcome::Simulated {
                detail: format!("would copy {} to {}", source.display(), target.display()),
            };
        }

        if let Some(parent) = target.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            return InstallStepOutcome::Failed {
                error: format!("{}: {e}", parent.display()),
            };
        }

        match fs::copy(source, target) {
            Ok(bytes) => InstallStepOutcome::Done {
                detail: format!(
                    "copied {} to {} ({bytes} bytes)",
                    source.display(),
                    target.display()
                ),
            },
            Err(e) => InstallStepOutcome::Failed {
                error: format!("copy {} to {}: {e}", source.display(), target.display()),
            },
        }
    }

    fn same_file(a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn register_hook(&self, command: &Path, what_if: bool) -> InstallStepOutcome {
        let name = &self.config.tracker.hook_name;

        if what_if {
            return InstallStepOutcome::Simulated {
                detail: format!("would register {name} to run {}", command.display()),
            };
        }

        match self.hook.register(name, command) {
            Ok(()) => InstallStepOutcome::Done {
                detail: format!("{name} runs {}", command.display()),
            },
            Err(e) => InstallStepOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    async fn seed(
        &self,
        pool: Option<&SqlitePool>,
        what_if: bool,
        now: DateTime<Local>,
    ) -> InstallStepOutcome {
        let seeder = Seeder::new(self.config, self.profiles);

        if what_if {
            return match seeder.plan(now) {
                Ok(report) => InstallStepOutcome::Simulated {
                    detail: format!(
                        "would seed {} of {} profiles",
                        report.seeded(),
                        report.discovered
                    ),
                },
                Err(e) => InstallStepOutcome::Failed {
                    error: e.to_string(),
                },
            };
        }

        let Some(pool) = pool else {
            return InstallStepOutcome::Failed {
                error: "store unavailable".to_string(),
            };
        };

        match seeder.run(pool, now).await {
            Ok(report) if report.failures.is_empty() => InstallStepOutcome::Done {
                detail: format!(
                    "seeded {}, skipped {}",
                    report.seeded(),
                    report.skipped.len()
                ),
            },
            Ok(report) => {
                warn!("Seeder reported {} failures", report.failures.len());
                InstallStepOutcome::Done {
                    detail: format!(
                        "seeded {}, skipped {}, failed {}",
                        report.seeded(),
                        report.skipped.len(),
                        report.failures.len()
                    ),
                }
            }
            Err(e) => InstallStepOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    fn unregister_hook(&self, what_if: bool) -> InstallStepOutcome {
        let name = &self.config.tracker.hook_name;

        if what_if {
            return InstallStepOutcome::Simulated {
                detail: format!("would unregister {name}"),
            };
        }

        match self.hook.unregister(name) {
            Ok(true) => InstallStepOutcome::Done {
                detail: format!("unregistered {name}"),
            },
            Ok(false) => InstallStepOutcome::NotFound,
            Err(e) => InstallStepOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    fn remove_file(path: &Path, what_if: bool) -> InstallStepOutcome {
        if !path.exists() {
            return InstallStepOutcome::NotFound;
        }

        if what_if {
            return InstallStepOutcome::Simulated {
                detail: format!("would remove {}", path.display()),
            };
        }

        match fs::remove_file(path) {
            Ok(()) => InstallStepOutcome::Done {
                detail: format!("removed {}", path.display()),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => InstallStepOutcome::NotFound,
            Err(e) => InstallStepOutcome::Failed {
                error: format!("{}: {e}", path.display()),
            },
        }
    }

    fn remove_store(&self, what_if: bool) -> InstallStepOutcome {
        let path = self.config.store_path();

        if what_if {
            return if path.exists() {
                InstallStepOutcome::Simulated {
                    detail: format!("would remove {}", path.display()),
                }
            } else {
                InstallStepOutcome::NotFound
            };
        }

        let outcome = match StoreConnection::remove(&path) {
            Ok(true) => InstallStepOutcome::Done {
                detail: format!("removed {}", path.display()),
            },
            Ok(false) => InstallStepOutcome::NotFound,
            Err(e) => InstallStepOutcome::Failed {
                error: e.to_string(),
            },
        };

        // Health belongs to the store it describes
        let health = self.config.tracker_health_path();
        if let Err(e) = fs::remove_file(&health)
            && e.kind() != ErrorKind::NotFound
        {
            warn!("Failed to remove {}: {e}", health.display());
        }

        outcome
    }
}
