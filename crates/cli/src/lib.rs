pub mod apply;
pub mod args;
pub mod config;
pub mod connection;
pub mod ensure;
pub mod error;
pub mod error_view;
pub mod logging;
pub mod migrate;
pub mod output;
pub mod push;
pub mod style;
pub mod ui;

pub use args::{ApplyArgs, Cli, Command, ConfigArgs, EnsureArgs, MigrateArgs, PushArgs};
pub use error::{CliError, ExitCode};
