use crate::SystemResult;

/// Local account primitives.
pub trait AccountManager: Send + Sync {
    fn account_exists(&self, username: &str) -> SystemResult<bool>;

    fn delete_account(&self, username: &str) -> SystemResult<()>;
}
