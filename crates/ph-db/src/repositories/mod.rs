pub mod profile_record_repository;
pub mod store_meta_repository;
