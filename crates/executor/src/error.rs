use crate::report::RunReport;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The target object is already present; the statement counts as applied.
    AlreadyExists,
    Fatal,
}

/// A failed statement as reported by the database-access layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StatementFailure {
    pub kind: FailureKind,
    pub code: Option<String>,
    pub message: String,
}

impl StatementFailure {
    pub fn already_exists(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::AlreadyExists,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn fatal(code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Fatal,
            code,
            message: message.into(),
        }
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind == FailureKind::AlreadyExists
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    ConnectionFailed {
        target: String,
        message: String,
    },
    StatementExecutionFailed {
        filename: String,
        statement_ordinal: usize,
        statement: String,
        code: Option<String>,
        message: String,
        report: RunReport,
    },
}

impl ExecutorError {
    /// What ran before the failure, when there was a run at all.
    pub fn partial_report(&self) -> Option<&RunReport> {
        match self {
            ExecutorError::StatementExecutionFailed { report, .. } => Some(report),
            ExecutorError::ConnectionFailed { .. } => None,
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutorError::ConnectionFailed { target, message } => {
                write!(f, "database connection failed ({target}): {message}")
            }
            ExecutorError::StatementExecutionFailed {
                filename,
                statement_ordinal,
                code,
                message,
                ..
            } => {
                if let Some(code) = code {
                    write!(
                        f,
                        "statement execution failed (file={filename}, ordinal={statement_ordinal}, sqlstate={code}): {message}"
                    )
                } else {
                    write!(
                        f,
                        "statement execution failed (file={filename}, ordinal={statement_ordinal}): {message}"
                    )
                }
            }
        }
    }
}

impl std::error::Error for ExecutorError {}
