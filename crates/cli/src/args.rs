use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plank", version, about = "Resolve the database connection and bootstrap its schema")]
pub struct Cli {
    /// Connection string to use instead of DATABASE_URL / PG* variables
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply every .sql file in a migrations directory
    Migrate(MigrateArgs),
    /// Apply a single .sql file
    Apply(ApplyArgs),
    /// Synchronize the live schema through the external schema tool
    Push(PushArgs),
    /// Resolve and persist DATABASE_URL, then check the database answers
    Ensure(EnsureArgs),
    /// Print the resolved connection without connecting
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    #[arg(long, default_value = "migrations")]
    pub dir: PathBuf,

    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PushArgs {
    /// Let the tool apply destructive changes
    #[arg(long)]
    pub accept_data_loss: bool,

    #[arg(long, default_value = plank_push::DEFAULT_TOOL)]
    pub tool: String,

    /// Argument for the tool; repeat for several (default: drizzle-kit push)
    #[arg(long = "tool-arg", allow_hyphen_values = true)]
    pub tool_args: Vec<String>,

    /// Directory to run the tool in (where its config file lives)
    #[arg(long)]
    pub cwd: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct EnsureArgs {
    #[arg(long, default_value = ".env")]
    pub settings_file: PathBuf,

    /// Do not write the resolved URL anywhere
    #[arg(long)]
    pub no_persist: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {}
