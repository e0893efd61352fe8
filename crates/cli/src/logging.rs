use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PLANK_LOG";

/// Installs the stderr log subscriber. `PLANK_LOG` wins over `RUST_LOG`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
