use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationDiscoveryError {
    EmptyMigrationsDir { dir: String },
    NotSqlFile { path: String },
    DuplicatePrefix { prefix: u64, first: String, second: String },
    Io { path: String, message: String },
}

impl fmt::Display for MigrationDiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationDiscoveryError::EmptyMigrationsDir { dir } => {
                write!(f, "no .sql migration files found in {dir}")
            }
            MigrationDiscoveryError::NotSqlFile { path } => {
                write!(f, "migration file must have a .sql extension: {path}")
            }
            MigrationDiscoveryError::DuplicatePrefix {
                prefix,
                first,
                second,
            } => write!(
                f,
                "duplicate migration prefix {prefix}: '{first}' and '{second}'"
            ),
            MigrationDiscoveryError::Io { path, message } => {
                write!(f, "I/O error while reading '{path}': {message}")
            }
        }
    }
}

impl Error for MigrationDiscoveryError {}
