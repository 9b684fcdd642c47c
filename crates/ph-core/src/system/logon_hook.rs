use crate::{HookStatus, SystemResult};

use std::path::Path;

/// The scheduler registration that runs the tracker at every logon.
pub trait LogonHook: Send + Sync {
    /// `Ok(None)` when nothing is registered under `name`.
    fn query(&self, name: &str) -> SystemResult<Option<HookStatus>>;

    /// Register (or replace) `name` to run `command` at logon under an
    /// elevated service identity.
    fn register(&self, name: &str, command: &Path) -> SystemResult<()>;

    /// Returns `false` when there was nothing to remove.
    fn unregister(&self, name: &str) -> SystemResult<bool>;
}
