use crate::error::{ExecutorError, FailureKind};
use crate::mode::ExecutionMode;
use crate::report::{ExecutionResult, FileReport, RunReport, StatementOutcome};
use crate::statement::{self, Session, StatementExecutor};
use plank_migration::MigrationFile;
use tracing::Instrument;

/// Applies migration files in order through a [`StatementExecutor`].
///
/// Statements run one at a time outside any transaction. An already-exists
/// failure is recorded and skipped; any other failure stops the run and is
/// returned together with what was executed so far.
pub struct Runner<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E> Runner<'a, E>
where
    E: StatementExecutor + ?Sized,
{
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    pub async fn run(&self, files: &[MigrationFile]) -> Result<RunReport, ExecutorError> {
        let report = RunReport::new(ExecutionMode::Apply);
        let span = tracing::info_span!("run", run_id = %report.run_id);

        self.run_files(report, files).instrument(span).await
    }

    async fn run_files(
        &self,
        mut report: RunReport,
        files: &[MigrationFile],
    ) -> Result<RunReport, ExecutorError> {
        for file in files {
            let statements = file.statements();
            tracing::info!(
                file = %file.filename,
                checksum = %file.checksum,
                statements = statements.len(),
                "applying migration"
            );

            let mut file_report = FileReport {
                filename: file.filename.clone(),
                checksum: file.checksum.clone(),
                outcomes: Vec::with_capacity(statements.len()),
            };

            for stmt in &statements {
                let kind = statement::statement_kind(&stmt.sql);
                let started = std::time::Instant::now();
                let result = self.executor.execute(&stmt.sql).await;
                let execution_time_ms = statement::duration_ms(started.elapsed());

                let failure = match result {
                    Ok(()) => {
                        tracing::debug!(ordinal = stmt.ordinal, kind = %kind, execution_time_ms, "statement applied");
                        file_report.outcomes.push(StatementOutcome {
                            ordinal: stmt.ordinal,
                            kind,
                            execution_time_ms,
                            result: ExecutionResult::Succeeded,
                        });
                        continue;
                    }
                    Err(failure) => failure,
                };

                match failure.kind {
                    FailureKind::AlreadyExists => {
                        tracing::info!(
                            ordinal = stmt.ordinal,
                            kind = %kind,
                            code = failure.code.as_deref().unwrap_or(""),
                            "object already exists, continuing: {}",
                            failure.message
                        );
                        file_report.outcomes.push(StatementOutcome {
                            ordinal: stmt.ordinal,
                            kind,
                            execution_time_ms,
                            result: ExecutionResult::AlreadyExists {
                                code: failure.code,
                                message: failure.message,
                            },
                        });
                    }
                    FailureKind::Fatal => {
                        tracing::error!(
                            file = %file.filename,
                            ordinal = stmt.ordinal,
                            kind = %kind,
                            error = %failure,
                            "statement failed"
                        );
                        file_report.outcomes.push(StatementOutcome {
                            ordinal: stmt.ordinal,
                            kind,
                            execution_time_ms,
                            result: ExecutionResult::Failed {
                                code: failure.code.clone(),
                                message: failure.message.clone(),
                            },
                        });
                        report.files.push(file_report);

                        return Err(ExecutorError::StatementExecutionFailed {
                            filename: file.filename.clone(),
                            statement_ordinal: stmt.ordinal,
                            statement: statement::sql_snippet(&stmt.sql),
                            code: failure.code,
                            message: failure.message,
                            report,
                        });
                    }
                }
            }

            report.files.push(file_report);
        }

        tracing::info!(
            files = report.files_completed(),
            statements = report.statements(),
            already_existed = report.already_existed(),
            "migrations applied"
        );

        Ok(report)
    }
}

/// Runs `files` on `session`, then releases it whether the run finished or
/// stopped at a fatal statement.
pub async fn run_and_release<S: Session>(
    session: S,
    files: &[MigrationFile],
) -> Result<RunReport, ExecutorError> {
    let result = Runner::new(&session).run(files).await;
    session.release().await;
    tracing::debug!(ok = result.is_ok(), "session released");
    result
}

#[cfg(test)]
mod tests {
    use super::{run_and_release, Runner};
    use crate::error::{ExecutorError, StatementFailure};
    use crate::report::ExecutionResult;
    use crate::statement::{Session, StatementExecutor};
    use async_trait::async_trait;
    use plank_migration::{MigrationFile, STATEMENT_BREAKPOINT};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Scripted {
        executed: Mutex<Vec<String>>,
        // SQL prefix -> failure returned for it
        failures: Vec<(&'static str, StatementFailure)>,
    }

    #[async_trait]
    impl StatementExecutor for Scripted {
        async fn execute(&self, sql: &str) -> Result<(), StatementFailure> {
            self.executed.lock().unwrap().push(sql.to_string());
            for (prefix, failure) in &self.failures {
                if sql.starts_with(prefix) {
                    return Err(failure.clone());
                }
            }
            Ok(())
        }
    }

    struct Pooled {
        inner: Scripted,
        released: Arc<AtomicBool>,
    }

    #[async_trait]
    impl StatementExecutor for Pooled {
        async fn execute(&self, sql: &str) -> Result<(), StatementFailure> {
            assert!(!self.released.load(Ordering::SeqCst), "used after release");
            self.inner.execute(sql).await
        }
    }

    #[async_trait]
    impl Session for Pooled {
        async fn release(self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn file(name: &str, pieces: &[&str]) -> MigrationFile {
        let sql = pieces.join(&format!("\n{STATEMENT_BREAKPOINT}\n"));
        MigrationFile::new(
            name.to_string(),
            PathBuf::from(name),
            None,
            "c".to_string(),
            sql,
        )
    }

    #[tokio::test]
    async fn executes_n_plus_one_statements_in_order() {
        let exec = Scripted::default();
        let files = [file("0001_a.sql", &["S1", "S2", "S3"]), file("0002_b.sql", &["S4"])];

        let report = Runner::new(&exec).run(&files).await.unwrap();

        assert_eq!(*exec.executed.lock().unwrap(), vec!["S1", "S2", "S3", "S4"]);
        assert_eq!(report.files_completed(), 2);
        assert_eq!(report.statements(), 4);
    }

    #[tokio::test]
    async fn already_exists_is_not_a_failure() {
        let exec = Scripted {
            failures: vec![(
                "CREATE",
                StatementFailure::already_exists("42P07", "relation \"leads\" already exists"),
            )],
            ..Default::default()
        };
        let files = [file("0001_a.sql", &["CREATE TABLE leads ()", "ALTER TABLE leads"])];

        let report = Runner::new(&exec).run(&files).await.unwrap();

        assert_eq!(exec.executed.lock().unwrap().len(), 2);
        assert_eq!(report.already_existed(), 1);
        assert!(matches!(
            report.files[0].outcomes[0].result,
            ExecutionResult::AlreadyExists { .. }
        ));
        assert_eq!(report.files[0].outcomes[1].result, ExecutionResult::Succeeded);
    }

    #[tokio::test]
    async fn fatal_failure_stops_file_and_run() {
        let exec = Scripted {
            failures: vec![(
                "BROKEN",
                StatementFailure::fatal(Some("42601".to_string()), "syntax error"),
            )],
            ..Default::default()
        };
        let files = [
            file("0001_a.sql", &["S1", "BROKEN", "S3"]),
            file("0002_b.sql", &["S4"]),
        ];

        let err = Runner::new(&exec).run(&files).await.unwrap_err();

        assert_eq!(*exec.executed.lock().unwrap(), vec!["S1", "BROKEN"]);
        match &err {
            ExecutorError::StatementExecutionFailed {
                filename,
                statement_ordinal,
                code,
                report,
                ..
            } => {
                assert_eq!(filename, "0001_a.sql");
                assert_eq!(*statement_ordinal, 2);
                assert_eq!(code.as_deref(), Some("42601"));
                assert_eq!(report.files.len(), 1);
                assert_eq!(report.files_completed(), 0);
                assert!(report.files[0].outcomes[1].result.is_failed());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.partial_report().is_some());
    }

    #[tokio::test]
    async fn earlier_files_stay_applied() {
        let exec = Scripted {
            failures: vec![("BROKEN", StatementFailure::fatal(None, "boom"))],
            ..Default::default()
        };
        let files = [file("0001_a.sql", &["S1"]), file("0002_b.sql", &["BROKEN"])];

        let err = Runner::new(&exec).run(&files).await.unwrap_err();
        let report = err.partial_report().unwrap();
        assert_eq!(report.files_completed(), 1);
        assert_eq!(report.files[0].filename, "0001_a.sql");
    }

    #[tokio::test]
    async fn session_is_released_after_fatal_failure() {
        let released = Arc::new(AtomicBool::new(false));
        let session = Pooled {
            inner: Scripted {
                failures: vec![("BROKEN", StatementFailure::fatal(None, "boom"))],
                ..Default::default()
            },
            released: Arc::clone(&released),
        };
        let files = [file("0001_a.sql", &["S1", "BROKEN", "S3"])];

        let err = run_and_release(session, &files).await.unwrap_err();

        assert!(matches!(err, ExecutorError::StatementExecutionFailed { .. }));
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn session_is_released_after_success() {
        let released = Arc::new(AtomicBool::new(false));
        let session = Pooled {
            inner: Scripted::default(),
            released: Arc::clone(&released),
        };

        let report = run_and_release(session, &[file("0001_a.sql", &["S1"])])
            .await
            .unwrap();

        assert_eq!(report.files_completed(), 1);
        assert!(released.load(Ordering::SeqCst));
    }
}
