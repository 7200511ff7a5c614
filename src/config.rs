//! Figures out where the expenses database lives.
//!
//! EXPENSES_DATABASE wins if set, otherwise ~/.expenses/expenses.db

use crate::error::{ExpenseError, Result};
use std::fmt;
use std::path::PathBuf;

/// Environment variable that overrides the database location
pub const DATABASE_ENV: &str = "EXPENSES_DATABASE";

const MEMORY_MARKER: &str = ":memory:";
const DEFAULT_DIR: &str = ".expenses";
const DEFAULT_FILE: &str = "expenses.db";

/// Where the expenses table is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseLocation::File(path) => write!(f, "{}", path.display()),
            DatabaseLocation::Memory => write!(f, "{}", MEMORY_MARKER),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseLocation,
}

impl Config {
    /// Resolve the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::resolve(std::env::var(DATABASE_ENV).ok())
    }

    /// Resolve from an explicit override value (the env var's contents, if any)
    pub fn resolve(override_value: Option<String>) -> Result<Self> {
        let database = match override_value.as_deref().map(str::trim) {
            Some(MEMORY_MARKER) => DatabaseLocation::Memory,
            Some(path) if !path.is_empty() => DatabaseLocation::File(PathBuf::from(path)),
            _ => DatabaseLocation::File(default_database_path()?),
        };

        Ok(Self { database })
    }
}

fn default_database_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        ExpenseError::Config(format!(
            "could not find home directory; set {} to choose a database file",
            DATABASE_ENV
        ))
    })?;

    Ok(home.join(DEFAULT_DIR).join(DEFAULT_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_override() {
        let config = Config::resolve(Some("/tmp/my-expenses.db".to_string())).unwrap();
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("/tmp/my-expenses.db"))
        );
    }

    #[test]
    fn test_memory_override() {
        let config = Config::resolve(Some(":memory:".to_string())).unwrap();
        assert_eq!(config.database, DatabaseLocation::Memory);
        assert_eq!(config.database.to_string(), ":memory:");
    }

    #[test]
    fn test_blank_override_falls_back_to_default() {
        // Only meaningful where a home directory exists
        if let Ok(config) = Config::resolve(Some("   ".to_string())) {
            match config.database {
                DatabaseLocation::File(path) => assert!(path.ends_with(".expenses/expenses.db")),
                DatabaseLocation::Memory => panic!("blank override should not mean memory"),
            }
        }
    }
}
