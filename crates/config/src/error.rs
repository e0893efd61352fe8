use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no usable database connection information")]
    NoCredentials,

    #[error("no usable database connection information (missing {})", missing.join(", "))]
    IncompleteCredentials { missing: Vec<&'static str> },

    #[error("invalid port '{value}' in {variable}")]
    InvalidPort {
        variable: &'static str,
        value: String,
    },
}

impl ConfigError {
    pub fn missing(&self) -> &[&'static str] {
        match self {
            ConfigError::IncompleteCredentials { missing } => missing,
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write settings file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: dotenvy::Error,
    },
}
