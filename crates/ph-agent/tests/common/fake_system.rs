use ph_core::{
    AccountManager, HookStatus, LiveProfile, LogonHook, ProfileRemover, ProfileSource,
    SessionInfo, Sid, SystemError, SystemResult,
};

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const ACCESS_DENIED: u32 = 5;

/// In-memory machine: profiles, accounts, the active session and scheduled tasks.
#[derive(Default)]
pub struct FakeSystem {
    profiles: Mutex<Vec<LiveProfile>>,
    accounts: Mutex<BTreeSet<String>>,
    session: Mutex<Option<SessionInfo>>,
    hooks: Mutex<BTreeMap<String, (PathBuf, HookStatus)>>,
    fail_enumeration: Mutex<bool>,
    fail_account_deletion: Mutex<BTreeSet<String>>,
    fail_profile_deletion: Mutex<BTreeSet<Sid>>,
    fail_hook_registration: Mutex<bool>,
    deleted_accounts: Mutex<Vec<String>>,
    deleted_profiles: Mutex<Vec<Sid>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, identity: Sid, path: &Path, loaded: bool) -> Self {
        self.profiles.lock().unwrap().push(LiveProfile {
            special: identity.is_service_identity(),
            identity,
            local_path: path.to_path_buf(),
            loaded,
        });
        self
    }

    pub fn with_account(self, username: &str) -> Self {
        self.accounts.lock().unwrap().insert(username.to_string());
        self
    }

    pub fn with_session(self, identity: Sid, username: &str, profile_path: Option<PathBuf>) -> Self {
        *self.session.lock().unwrap() = Some(SessionInfo {
            identity,
            username: username.to_string(),
            profile_path,
        });
        self
    }

    pub fn with_hook(self, name: &str, command: &Path, state: &str) -> Self {
        self.hooks.lock().unwrap().insert(
            name.to_string(),
            (
                command.to_path_buf(),
                HookStatus {
                    name: name.to_string(),
                    enabled: !state.eq_ignore_ascii_case("Disabled"),
                    state: state.to_string(),
                },
            ),
        );
        self
    }

    pub fn failing_enumeration(self) -> Self {
        *self.fail_enumeration.lock().unwrap() = true;
        self
    }

    pub fn failing_account_deletion(self, username: &str) -> Self {
        self.fail_account_deletion
            .lock()
            .unwrap()
            .insert(username.to_string());
        self
    }

    pub fn failing_profile_deletion(self, identity: Sid) -> Self {
        self.fail_profile_deletion.lock().unwrap().insert(identity);
        self
    }

    pub fn failing_hook_registration(self) -> Self {
        *self.fail_hook_registration.lock().unwrap() = true;
        self
    }

    pub fn has_account(&self, username: &str) -> bool {
        self.accounts.lock().unwrap().contains(username)
    }

    pub fn deleted_accounts(&self) -> Vec<String> {
        self.deleted_accounts.lock().unwrap().clone()
    }

    pub fn deleted_profiles(&self) -> Vec<Sid> {
        self.deleted_profiles.lock().unwrap().clone()
    }

    pub fn hook_command(&self, name: &str) -> Option<PathBuf> {
        self.hooks
            .lock()
            .unwrap()
            .get(name)
            .map(|(command, _)| command.clone())
    }
}

impl ProfileSource for FakeSystem {
    fn list_profiles(&self) -> SystemResult<Vec<LiveProfile>> {
        if *self.fail_enumeration.lock().unwrap() {
            return Err(SystemError::os("profile enumeration", ACCESS_DENIED));
        }
        Ok(self.profiles.lock().unwrap().clone())
    }

    fn current_session(&self) -> SystemResult<SessionInfo> {
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SystemError::invalid_data("session lookup", "no active session"))
    }
}

impl AccountManager for FakeSystem {
    fn account_exists(&self, username: &str) -> SystemResult<bool> {
        Ok(self.has_account(username))
    }

    fn delete_account(&self, username: &str) -> SystemResult<()> {
        if self.fail_account_deletion.lock().unwrap().contains(username) {
            return Err(SystemError::os("NetUserDel", ACCESS_DENIED));
        }
        self.accounts.lock().unwrap().remove(username);
        self.deleted_accounts
            .lock()
            .unwrap()
            .push(username.to_string());
        Ok(())
    }
}

impl ProfileRemover for FakeSystem {
    fn delete_profile(&self, identity: &Sid) -> SystemResult<()> {
        if self.fail_profile_deletion.lock().unwrap().contains(identity) {
            return Err(SystemError::os("DeleteProfileW", ACCESS_DENIED));
        }

        let mut profiles = self.profiles.lock().unwrap();
        if let Some(index) = profiles.iter().position(|p| &p.identity == identity) {
            let removed = profiles.remove(index);
            if removed.local_path.exists() {
                std::fs::remove_dir_all(&removed.local_path)
                    .map_err(|e| SystemError::io("DeleteProfileW", e))?;
            }
        }
        self.deleted_profiles.lock().unwrap().push(identity.clone());
        Ok(())
    }
}

impl LogonHook for FakeSystem {
    fn query(&self, name: &str) -> SystemResult<Option<HookStatus>> {
        Ok(self
            .hooks
            .lock()
            .unwrap()
            .get(name)
            .map(|(_, status)| status.clone()))
    }

    fn register(&self, name: &str, command: &Path) -> SystemResult<()> {
        if *self.fail_hook_registration.lock().unwrap() {
            return Err(SystemError::command("schtasks /Create", "access denied"));
        }
        self.hooks.lock().unwrap().insert(
            name.to_string(),
            (
                command.to_path_buf(),
                HookStatus {
                    name: name.to_string(),
                    enabled: true,
                    state: "Ready".to_string(),
                },
            ),
        );
        Ok(())
    }

    fn unregister(&self, name: &str) -> SystemResult<bool> {
        Ok(self.hooks.lock().unwrap().remove(name).is_some())
    }
}
