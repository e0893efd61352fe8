//! Database credential resolution for plank.
//!
//! Every subcommand resolves its connection through [`resolve`], a pure
//! function over an [`Env`] mapping. Writing the result anywhere else is the
//! caller's decision, expressed as a list of [`SettingsSink`]s.

mod env;
mod error;
mod host;
mod persist;
mod resolve;

pub use env::Env;
pub use error::{ConfigError, PersistError};
pub use host::HostEnvironment;
pub use persist::{persist_best_effort, DotenvFileSink, SettingsSink};
pub use resolve::{resolve, ConnectionConfig, Provenance, DEFAULT_PORT};

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const PGHOST: &str = "PGHOST";
pub const PGUSER: &str = "PGUSER";
pub const PGPASSWORD: &str = "PGPASSWORD";
pub const PGDATABASE: &str = "PGDATABASE";
pub const PGPORT: &str = "PGPORT";
