use crate::split::split_statements;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub filename: String,
    pub path: PathBuf,
    /// Numeric filename prefix, e.g. `1` for `0001_init.sql`.
    pub prefix: Option<u64>,
    pub checksum: String,
    pub sql: String,
}

impl MigrationFile {
    pub fn new(
        filename: String,
        path: PathBuf,
        prefix: Option<u64>,
        checksum: String,
        sql: String,
    ) -> Self {
        Self {
            filename,
            path,
            prefix,
            checksum,
            sql,
        }
    }

    pub fn statements(&self) -> Vec<Statement> {
        split_statements(&self.sql)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based position within the file.
    pub ordinal: usize,
    pub sql: String,
}
