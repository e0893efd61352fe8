use crate::error::CliError;
use plank_config::{resolve, ConfigError, ConnectionConfig, Env, HostEnvironment};
use plank_executor::ExecutorError;

pub struct Resolved {
    pub config: ConnectionConfig,
    pub host: HostEnvironment,
}

pub fn resolve_connection(database_url: Option<&str>) -> Result<Resolved, CliError> {
    let env = Env::from_process();
    let host = HostEnvironment::detect(&env);

    let config = resolve(&env, database_url).map_err(map_config_error)?;
    tracing::debug!(
        source = %config.provenance(),
        host = host.as_str(),
        target_db = %config.redacted(),
        "resolved database connection"
    );

    Ok(Resolved { config, host })
}

pub fn map_config_error(err: ConfigError) -> CliError {
    let base = CliError::user_error("Database configuration is missing or invalid")
        .with_reason(err.to_string());

    match err {
        ConfigError::InvalidPort { variable, .. } => {
            base.with_action(format!("Set {variable} to a port number between 1 and 65535"))
        }
        _ => base
            .with_meaning("No connection was attempted.")
            .with_action(
                "Set DATABASE_URL, or all of PGHOST, PGUSER, PGPASSWORD and PGDATABASE (PGPORT optional), or pass --database-url",
            ),
    }
}

pub fn map_connection_error(err: &ExecutorError) -> CliError {
    CliError::connection_failed("Could not connect to the database")
        .with_reason(err.to_string())
        .with_action("Check that the database is reachable and the credentials are correct")
}
