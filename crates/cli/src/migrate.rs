use crate::args::MigrateArgs;
use crate::connection::{map_connection_error, resolve_connection};
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use plank_config::ConnectionConfig;
use plank_executor::{
    apply_with_postgres, dry_run, ExecutionMode, ExecutionResult, ExecutorError, FileReport,
    RunReport,
};
use plank_migration::{discover_migrations, MigrationDiscoveryError, MigrationFile};

pub async fn run(args: &MigrateArgs, database_url: Option<&str>) -> Result<(), CliError> {
    let migrations = discover_migrations(&args.dir).map_err(map_discovery_error)?;
    execute("Plank Migrate", &migrations, args.dry_run, database_url).await
}

pub(crate) async fn execute(
    title: &str,
    migrations: &[MigrationFile],
    dry_run: bool,
    database_url: Option<&str>,
) -> Result<(), CliError> {
    let ui = Ui::new(Style::detect());

    if dry_run {
        let report = dry_run::plan(migrations);
        output::lines(render_report(&ui, title, &report, None));
        return Ok(());
    }

    let resolved = resolve_connection(database_url)?;

    match apply_with_postgres(&resolved.config, migrations).await {
        Ok(report) => {
            output::lines(render_report(&ui, title, &report, Some(&resolved.config)));
            Ok(())
        }
        Err(err) => {
            if let Some(report) = err.partial_report() {
                output::lines(render_report(&ui, title, report, Some(&resolved.config)));
            }
            Err(map_executor_error(err))
        }
    }
}

pub(crate) fn render_report(
    ui: &Ui,
    title: &str,
    report: &RunReport,
    config: Option<&ConnectionConfig>,
) -> Vec<String> {
    let mut out = ui.header(title);
    out.push(ui.kv("run_id", &report.run_id.to_string()));
    out.push(ui.kv("mode", report.mode.as_str()));
    if let Some(config) = config {
        out.push(ui.kv("target", &config.redacted()));
        out.push(ui.kv("source", &config.provenance().to_string()));
    }
    out.push(String::new());

    for file in &report.files {
        out.push(ui.list_item_with_suffix(
            &file.filename,
            file_status(file),
            Some(file_suffix(file).as_str()),
        ));
    }
    out.push(String::new());

    let statements = report.statements();
    let existing = report.already_existed();
    let failed = report.files.len() - report.files_completed();

    if failed > 0 {
        out.push(ui.fail_line(&format!(
            "stopped after {} of {} file(s)",
            report.files_completed(),
            report.files.len()
        )));
    } else if report.mode == ExecutionMode::DryRun {
        out.push(ui.info_line(&format!(
            "{} file(s), {statements} statement(s) would run",
            report.files.len()
        )));
    } else {
        out.push(ui.ok_line(&format!(
            "{} file(s) applied ({statements} statement(s), {existing} already existed)",
            report.files_completed()
        )));
    }

    out.push(ui.rule());
    out
}

fn file_status(file: &FileReport) -> &'static str {
    if !file.is_complete() {
        "failed"
    } else if file
        .outcomes
        .iter()
        .all(|o| o.result == ExecutionResult::Planned)
        && !file.outcomes.is_empty()
    {
        "planned"
    } else {
        "ok"
    }
}

fn file_suffix(file: &FileReport) -> String {
    let n = file.outcomes.len();
    let existing = file
        .outcomes
        .iter()
        .filter(|o| matches!(o.result, ExecutionResult::AlreadyExists { .. }))
        .count();

    let noun = if n == 1 { "statement" } else { "statements" };
    if existing > 0 {
        format!("{n} {noun}, {existing} existing")
    } else {
        format!("{n} {noun}")
    }
}

pub(crate) fn map_discovery_error(err: MigrationDiscoveryError) -> CliError {
    let base = CliError::user_error("Migration discovery failed").with_reason(err.to_string());

    match err {
        MigrationDiscoveryError::DuplicatePrefix { .. } => {
            base.with_action("Renumber one of the files so every prefix is unique")
        }
        MigrationDiscoveryError::EmptyMigrationsDir { .. } => {
            base.with_action("Generate migrations first or point --dir at the right directory")
        }
        _ => base,
    }
}

pub(crate) fn map_executor_error(err: ExecutorError) -> CliError {
    match &err {
        ExecutorError::ConnectionFailed { .. } => map_connection_error(&err),
        ExecutorError::StatementExecutionFailed {
            filename,
            statement_ordinal,
            statement,
            code,
            message,
            ..
        } => {
            let reason = match code {
                Some(code) => format!("{message} (sqlstate {code})\n{statement}"),
                None => format!("{message}\n{statement}"),
            };

            CliError::migration_failed(format!(
                "Migration failed at {filename} (statement {statement_ordinal})"
            ))
            .with_reason(reason)
            .with_meaning(
                "Earlier statements and files stay applied; the rest of this run was not executed.",
            )
            .with_action("Fix the statement and run again; objects that already exist are skipped")
        }
    }
}
