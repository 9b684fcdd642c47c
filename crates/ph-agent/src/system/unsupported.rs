use ph_core::{
    AccountManager, HookStatus, LiveProfile, LogonHook, ProfileRemover, ProfileSource,
    SessionInfo, Sid, SystemError, SystemResult,
};

use std::path::Path;

/// Backend for platforms without user profiles to manage.
#[derive(Debug, Default)]
pub struct UnsupportedSystem;

impl UnsupportedSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileSource for UnsupportedSystem {
    fn list_profiles(&self) -> SystemResult<Vec<LiveProfile>> {
        Err(SystemError::unsupported("profile enumeration"))
    }

    fn current_session(&self) -> SystemResult<SessionInfo> {
        Err(SystemError::unsupported("session lookup"))
    }
}

impl AccountManager for UnsupportedSystem {
    fn account_exists(&self, _username: &str) -> SystemResult<bool> {
        Err(SystemError::unsupported("account lookup"))
    }

    fn delete_account(&self, _username: &str) -> SystemResult<()> {
        Err(SystemError::unsupported("account deletion"))
    }
}

impl ProfileRemover for UnsupportedSystem {
    fn delete_profile(&self, _identity: &Sid) -> SystemResult<()> {
        Err(SystemError::unsupported("profile deletion"))
    }
}

impl LogonHook for UnsupportedSystem {
    fn query(&self, _name: &str) -> SystemResult<Option<HookStatus>> {
        Err(SystemError::unsupported("logon hook query"))
    }

    fn register(&self, _name: &str, _command: &Path) -> SystemResult<()> {
        Err(SystemError::unsupported("logon hook registration"))
    }

    fn unregister(&self, _name: &str) -> SystemResult<bool> {
        Err(SystemError::unsupported("logon hook removal"))
    }
}
