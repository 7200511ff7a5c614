//! expense-tracker library
//!
//! Expense store over SQLite plus the command interpreter that drives it.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{ExpenseError, Result};
