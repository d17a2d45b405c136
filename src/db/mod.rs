//! Database layer
//!
//! This module provides database abstraction for the Newsdesk content system.
//! It supports:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for larger deployments)
//!
//! The database driver is selected based on configuration. Repositories use
//! a trait-based abstraction (`DatabasePool`) so the rest of the crate never
//! needs to know which backend is active.

pub mod migrations;
pub mod pool;
pub mod repositories;
pub mod seeds;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
