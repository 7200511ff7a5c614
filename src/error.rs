//! Error types for the expense tracker
//!
//! Every failure a command can hit ends up as an `ExpenseError`.
//! A missing expense on delete is not one of them; see `DeleteOutcome`.

use thiserror::Error;

/// Main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// A required CLI argument is missing or malformed
    #[error("Usage error: {0}")]
    Usage(String),

    /// The database rejected a write, or the amount could not be parsed
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Opening the database or creating the schema failed
    #[error("Connection failure: {0}")]
    Connection(String),

    /// Any other database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (terminal, stdout)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database location could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for expense tracker operations
pub type Result<T> = std::result::Result<T, ExpenseError>;

impl ExpenseError {
    /// Message printed to stderr before the process exits
    pub fn user_message(&self) -> String {
        match self {
            ExpenseError::Usage(msg) => msg.clone(),
            ExpenseError::ConstraintViolation(msg) => {
                format!("The expense was not saved: {}", msg)
            }
            ExpenseError::Connection(msg) => {
                format!("Could not open the expenses database: {}", msg)
            }
            ExpenseError::Database(e) => {
                format!("Database error occurred. Details: {}", e)
            }
            ExpenseError::Io(e) => {
                format!("Terminal error. Details: {}", e)
            }
            ExpenseError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ExpenseError::Usage(_) => 2,
            _ => 1,
        }
    }
}
