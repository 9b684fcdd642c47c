pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::store_connection::StoreConnection;
pub use error::{DbError, Result};
pub use repositories::profile_record_repository::ProfileRecordRepository;
pub use repositories::store_meta_repository::StoreMetaRepository;

/// Key of the version marker at the store root.
pub const VERSION_KEY: &str = "version";
