//! Expense store
//!
//! Owns the SQLite connection, creates the schema on first use, and exposes
//! the add/list/search/delete operations.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
