
use ph_config::Config;
use ph_core::{
    AccountManager, HookStatus, LiveProfile, LogonHook, ProfileRemover, ProfileSource,
    SessionInfo, Sid, SystemError, SystemResult,
};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::TempDir;

pub(crate) fn config_in(dir: &TempDir) -> Config {
    Config {
        config_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

/// A machine with `users` user profiles and no logon hook.
#[derive(Default)]
pub(crate) struct StubSystem {
    users: u32,
    broken: bool,
}

impl StubSystem {
    pub(crate) fn with_users(users: u32) -> Self {
        Self {
            users,
            broken: false,
        }
    }

    pub(crate) fn broken() -> Self {
        Self {
            users: 0,
            broken: true,
        }
    }
}

impl ProfileSource for StubSystem {
    fn list_profiles(&self) -> SystemResult<Vec<LiveProfile>> {
        if self.broken {
            return Err(SystemError::os("profile enumeration", 5));
        }
        Ok((0..self.users)
            .map(|rid| LiveProfile {
                identity: Sid::from_str(&format!("S-1-5-21-1-2-3-{}", 1000 + rid)).unwrap(),
                local_path: PathBuf::from(format!(r"C:\Users\user{rid}")),
                loaded: false,
                special: false,
            })
            .collect())
    }

    fn current_session(&self) -> SystemResult<SessionInfo> {
        Err(SystemError::invalid_data("session lookup", "no active session"))
    }
}

impl AccountManager for StubSystem {
    fn account_exists(&self, _username: &str) -> SystemResult<bool> {
        Ok(false)
    }

    fn delete_account(&self, _username: &str) -> SystemResult<()> {
        Ok(())
    }
}

impl ProfileRemover for StubSystem {
    fn delete_profile(&self, _identity: &Sid) -> SystemResult<()> {
        Ok(())
    }
}

impl LogonHook for StubSystem {
    fn query(&self, _name: &str) -> SystemResult<Option<HookStatus>> {
        Ok(None)
    }

    fn register(&self, _name: &str, _command: &Path) -> SystemResult<()> {
        Ok(())
    }

    fn unregister(&self, _name: &str) -> SystemResult<bool> {
        Ok(false)
    }
}
