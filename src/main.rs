use clap::Parser;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = plank_cli::Cli::parse();
    plank_cli::logging::init(cli.verbose);

    let database_url = cli.database_url.as_deref();

    let result = match &cli.command {
        plank_cli::Command::Migrate(args) => plank_cli::migrate::run(args, database_url).await,
        plank_cli::Command::Apply(args) => plank_cli::apply::run(args, database_url).await,
        plank_cli::Command::Push(args) => plank_cli::push::run(args, database_url).await,
        plank_cli::Command::Ensure(args) => plank_cli::ensure::run(args, database_url).await,
        plank_cli::Command::Config(args) => plank_cli::config::run(args, database_url),
    };

    if let Err(err) = result {
        plank_cli::error_view::print(&err);
        std::process::exit(err.exit_code());
    }
}
