mod accounts;
mod profile_list;
mod scheduler;
mod session;
mod wide;

use ph_core::{
    AccountManager, HookStatus, LiveProfile, LogonHook, ProfileRemover, ProfileSource,
    SessionInfo, Sid, SystemResult,
};

use std::path::Path;

/// Windows implementation of every OS capability the agent uses.
#[derive(Debug, Default)]
pub struct WindowsSystem;

impl WindowsSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileSource for WindowsSystem {
    fn list_profiles(&self) -> SystemResult<Vec<LiveProfile>> {
        profile_list::list_profiles()
    }

    fn current_session(&self) -> SystemResult<SessionInfo> {
        session::current_session()
    }
}

impl AccountManager for WindowsSystem {
    fn account_exists(&self, username: &str) -> SystemResult<bool> {
        accounts::account_exists(username)
    }

    fn delete_account(&self, username: &str) -> SystemResult<()> {
        accounts::delete_account(username)
    }
}

impl ProfileRemover for WindowsSystem {
    fn delete_profile(&self, identity: &Sid) -> SystemResult<()> {
        accounts::delete_profile(identity)
    }
}

impl LogonHook for WindowsSystem {
    fn query(&self, name: &str) -> SystemResult<Option<HookStatus>> {
        scheduler::query(name)
    }

    fn register(&self, name: &str, command: &Path) -> SystemResult<()> {
        scheduler::register(name, command)
    }

    fn unregister(&self, name: &str) -> SystemResult<bool> {
        scheduler::unregister(name)
    }
}
