pub mod store_connection;
