//! Database module
//!
//! SQLite connection pool, migrations, and the key-value slots built on them.

pub mod connection;
pub mod kv;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
