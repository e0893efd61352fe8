use crate::error::{ExecutorError, StatementFailure};
use crate::report::RunReport;
use crate::runner::run_and_release;
use crate::statement::{classify_sqlstate, Session, StatementExecutor};
use async_trait::async_trait;
use plank_config::ConnectionConfig;
use plank_migration::MigrationFile;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ExecutorError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(config.url())
            .await
            .map_err(|e| ExecutorError::ConnectionFailed {
                target: config.redacted(),
                message: e.to_string(),
            })?;

        tracing::debug!(target_db = %config.redacted(), "connected");
        Ok(Self { pool })
    }

    /// Round-trips `SELECT 1` to prove the connection is usable.
    pub async fn ping(&self) -> Result<(), ExecutorError> {
        let _: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ExecutorError::ConnectionFailed {
                target: "<pool>".to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!("connection closed");
    }
}

#[async_trait]
impl StatementExecutor for PgExecutor {
    async fn execute(&self, sql: &str) -> Result<(), StatementFailure> {
        if sql.trim().is_empty() {
            return Ok(());
        }

        // Simple query protocol: one piece may hold several commands.
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(StatementFailure::from)
    }
}

#[async_trait]
impl Session for PgExecutor {
    async fn release(self) {
        self.close().await;
    }
}

impl From<sqlx::Error> for StatementFailure {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned());
                StatementFailure {
                    kind: classify_sqlstate(code.as_deref()),
                    code,
                    message: db.message().to_string(),
                }
            }
            _ => StatementFailure::fatal(None, err.to_string()),
        }
    }
}

/// Connects, applies `files`, and closes the pool whether or not the run
/// succeeded.
pub async fn apply_with_postgres(
    config: &ConnectionConfig,
    files: &[MigrationFile],
) -> Result<RunReport, ExecutorError> {
    let executor = PgExecutor::connect(config).await?;
    run_and_release(executor, files).await
}
