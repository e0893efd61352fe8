pub mod dry_run;
pub mod error;
pub mod mode;
pub mod postgres;
pub mod report;
pub mod runner;
pub mod statement;

pub use error::{ExecutorError, FailureKind, StatementFailure};
pub use mode::ExecutionMode;
pub use postgres::{apply_with_postgres, PgExecutor};
pub use report::{ExecutionResult, FileReport, RunReport, StatementOutcome};
pub use runner::{run_and_release, Runner};
pub use statement::{classify_sqlstate, Session, StatementExecutor};
