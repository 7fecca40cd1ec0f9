//! Infrastructure: SQLite connection manager and migrations.

pub mod db;

pub use db::{init_test_db, ConnGuard, DbConfig, DbLocation, DbPool};
