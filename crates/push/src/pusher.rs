use crate::error::PushError;
use plank_config::{ConnectionConfig, DATABASE_URL};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_TOOL: &str = "npx";
pub const DEFAULT_TOOL_ARGS: &[&str] = &["drizzle-kit", "push"];
pub const ACCEPT_DATA_LOSS_FLAG: &str = "--accept-data-loss";

#[derive(Debug, Clone)]
pub struct SchemaPusher {
    program: String,
    args: Vec<String>,
    accept_data_loss: bool,
    working_dir: Option<PathBuf>,
}

impl Default for SchemaPusher {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOOL,
            DEFAULT_TOOL_ARGS.iter().map(|s| s.to_string()),
        )
    }
}

impl SchemaPusher {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            accept_data_loss: false,
            working_dir: None,
        }
    }

    pub fn accept_data_loss(mut self, accept: bool) -> Self {
        self.accept_data_loss = accept;
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Full argument list passed to the tool.
    pub fn args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        if self.accept_data_loss {
            args.push(ACCEPT_DATA_LOSS_FLAG.to_string());
        }
        args
    }

    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args());
        parts.join(" ")
    }

    /// Runs the tool with `DATABASE_URL` set for the child only; its output
    /// goes straight to this process's stdout/stderr.
    pub async fn push(&self, config: &ConnectionConfig) -> Result<(), PushError> {
        let command_line = self.command_line();
        tracing::info!(command = %command_line, target_db = %config.redacted(), "pushing schema");

        let mut cmd = Command::new(&self.program);
        cmd.args(self.args())
            .env(DATABASE_URL, config.url())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status().await.map_err(|e| PushError::Spawn {
            command: command_line.clone(),
            source: e,
        })?;

        if status.success() {
            tracing::info!(command = %command_line, "schema push finished");
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(PushError::ExitStatus {
                command: command_line,
                code,
            }),
            None => Err(PushError::Terminated {
                command: command_line,
            }),
        }
    }
}
