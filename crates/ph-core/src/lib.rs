pub mod error;
pub mod exclusion;
pub mod models;
pub mod system;
pub mod timestamp;
pub mod username;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use exclusion::ExclusionPolicy;
pub use models::hook_status::HookStatus;
pub use models::live_profile::LiveProfile;
pub use models::profile_record::ProfileRecord;
pub use models::session_info::SessionInfo;
pub use models::sid::Sid;
pub use system::account_manager::AccountManager;
pub use system::error::{Result as SystemResult, SystemError};
pub use system::logon_hook::LogonHook;
pub use system::profile_remover::ProfileRemover;
pub use system::profile_source::ProfileSource;
pub use timestamp::{LAST_LOGON_FORMAT, format_last_logon, parse_last_logon};
pub use username::{sanitize_username, username_from_profile_path};

pub use error_location::ErrorLocation;

/// Identity prefix shared by local and domain user accounts.
pub const USER_IDENTITY_PREFIX: &str = "S-1-5-21-";
