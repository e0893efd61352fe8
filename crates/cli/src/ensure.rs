use crate::args::EnsureArgs;
use crate::connection::{map_connection_error, resolve_connection};
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use plank_config::{persist_best_effort, DotenvFileSink, HostEnvironment, SettingsSink};
use plank_executor::PgExecutor;

pub async fn run(args: &EnsureArgs, database_url: Option<&str>) -> Result<(), CliError> {
    let resolved = resolve_connection(database_url)?;
    let ui = Ui::new(Style::detect());

    let mut lines = ui.header("Plank Ensure");
    lines.push(ui.kv("url", &resolved.config.redacted()));
    lines.push(ui.kv("source", &resolved.config.provenance().to_string()));
    lines.push(ui.kv("environment", resolved.host.as_str()));

    if !args.no_persist {
        let dotenv = DotenvFileSink::new(&args.settings_file);
        let sinks = sinks_for(resolved.host, &dotenv);
        let persisted = persist_best_effort(&sinks, &resolved.config);
        lines.push(ui.kv("persisted_to", &persisted_to(&sinks, persisted)));
    }

    let executor = PgExecutor::connect(&resolved.config)
        .await
        .map_err(|e| map_connection_error(&e))?;
    let ping = executor.ping().await;
    executor.close().await;
    ping.map_err(|e| map_connection_error(&e))?;

    lines.push(String::new());
    lines.push(ui.ok_line("database is reachable"));
    lines.push(ui.rule());
    output::lines(lines);

    Ok(())
}

// This process exits right after the check, so only a file outlives it.
fn sinks_for<'a>(host: HostEnvironment, dotenv: &'a DotenvFileSink) -> Vec<&'a dyn SettingsSink> {
    if host.is_hosted_production() {
        tracing::info!("hosted production: not writing a settings file");
        return Vec::new();
    }
    let sink: &dyn SettingsSink = dotenv;
    vec![sink]
}

fn persisted_to(sinks: &[&dyn SettingsSink], persisted: usize) -> String {
    if persisted == 0 {
        return "-".to_string();
    }
    sinks
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}
