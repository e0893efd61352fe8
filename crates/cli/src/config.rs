use crate::args::ConfigArgs;
use crate::connection::resolve_connection;
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use plank_config::Provenance;

pub fn run(_args: &ConfigArgs, database_url: Option<&str>) -> Result<(), CliError> {
    let resolved = resolve_connection(database_url)?;
    let ui = Ui::new(Style::detect());

    let mut lines = ui.header("Plank Config");
    lines.push(ui.kv("url", &resolved.config.redacted()));
    lines.push(ui.kv("source", &resolved.config.provenance().to_string()));

    if let Provenance::Assembled {
        host,
        port,
        database,
        user,
    } = resolved.config.provenance()
    {
        lines.push(ui.kv("host", host));
        lines.push(ui.kv("port", &port.to_string()));
        lines.push(ui.kv("database", database));
        lines.push(ui.kv("user", user));
    }

    lines.push(ui.kv("environment", resolved.host.as_str()));
    lines.push(ui.rule());

    output::lines(lines);
    Ok(())
}
