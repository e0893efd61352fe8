use crate::args::ApplyArgs;
use crate::error::CliError;
use crate::migrate::{execute, map_discovery_error};
use plank_migration::load_migration_file;

pub async fn run(args: &ApplyArgs, database_url: Option<&str>) -> Result<(), CliError> {
    let migration = load_migration_file(&args.file).map_err(map_discovery_error)?;
    execute("Plank Apply", &[migration], args.dry_run, database_url).await
}
