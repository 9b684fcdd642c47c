pub mod hook_status;
pub mod live_profile;
pub mod profile_record;
pub mod session_info;
pub mod sid;
