#![allow(dead_code)]

mod env_guard;
mod fake_system;
mod fixtures;

pub use env_guard::EnvGuard;
pub use fake_system::FakeSystem;
pub use fixtures::{
    TestEnv, days_ago, fixed_now, profile_dir, record, sid, stored_record, write_bytes,
};
