use crate::{LiveProfile, SessionInfo, SystemResult};

pub trait ProfileSource: Send + Sync {
    /// Every profile registered on this machine, special ones included.
    fn list_profiles(&self) -> SystemResult<Vec<LiveProfile>>;

    /// Identity and display name of the active interactive session.
    fn current_session(&self) -> SystemResult<SessionInfo>;
}
