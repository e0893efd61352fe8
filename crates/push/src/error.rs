use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}")]
    ExitStatus { command: String, code: i32 },

    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },
}

impl PushError {
    pub fn command(&self) -> &str {
        match self {
            PushError::Spawn { command, .. }
            | PushError::ExitStatus { command, .. }
            | PushError::Terminated { command } => command,
        }
    }
}
