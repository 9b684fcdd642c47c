#![allow(dead_code)]

mod fixtures;
mod test_db;

pub use fixtures::{create_test_record, create_test_record_at, test_sid};
pub use test_db::{TestStore, create_test_store};
