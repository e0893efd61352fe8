use crate::args::PushArgs;
use crate::connection::resolve_connection;
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use plank_push::{PushError, SchemaPusher, DEFAULT_TOOL_ARGS};

pub async fn run(args: &PushArgs, database_url: Option<&str>) -> Result<(), CliError> {
    let resolved = resolve_connection(database_url)?;
    let pusher = build_pusher(args);

    if args.accept_data_loss && resolved.host.is_hosted_production() {
        tracing::warn!("accepting data loss against the hosted production database");
    }

    pusher
        .push(&resolved.config)
        .await
        .map_err(map_push_error)?;

    let ui = Ui::new(Style::detect());
    output::line(ui.ok_line(&format!(
        "schema pushed to {}",
        resolved.config.redacted()
    )));

    Ok(())
}

fn build_pusher(args: &PushArgs) -> SchemaPusher {
    let tool_args: Vec<String> = if args.tool_args.is_empty() {
        DEFAULT_TOOL_ARGS.iter().map(|s| s.to_string()).collect()
    } else {
        args.tool_args.clone()
    };

    let pusher =
        SchemaPusher::new(args.tool.clone(), tool_args).accept_data_loss(args.accept_data_loss);
    match &args.cwd {
        Some(dir) => pusher.working_dir(dir),
        None => pusher,
    }
}

fn map_push_error(err: PushError) -> CliError {
    let base = CliError::push_failed("Schema push failed").with_reason(err.to_string());

    match err {
        PushError::Spawn { .. } => {
            base.with_action("Install the schema tool or pass --tool / --tool-arg to point at it")
        }
        PushError::ExitStatus { .. } | PushError::Terminated { .. } => base
            .with_meaning("The live schema may be partially synchronized.")
            .with_action("Read the tool output above, fix the cause and push again"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;

    fn args(tool_args: Vec<&str>, accept: bool) -> PushArgs {
        PushArgs {
            accept_data_loss: accept,
            tool: "npx".to_string(),
            tool_args: tool_args.into_iter().map(String::from).collect(),
            cwd: None,
        }
    }

    #[test]
    fn defaults_to_drizzle_push() {
        let pusher = build_pusher(&args(vec![], true));
        assert_eq!(
            pusher.command_line(),
            "npx drizzle-kit push --accept-data-loss"
        );
    }

    #[test]
    fn custom_tool_args_replace_defaults() {
        let pusher = build_pusher(&args(vec!["prisma", "db", "push"], false));
        assert_eq!(pusher.command_line(), "npx prisma db push");
    }

    #[test]
    fn cwd_is_passed_to_the_tool() {
        let mut push = args(vec![], false);
        assert_eq!(build_pusher(&push).current_dir(), None);

        push.cwd = Some("db/schema".into());
        assert_eq!(
            build_pusher(&push).current_dir(),
            Some(std::path::Path::new("db/schema"))
        );
    }

    #[test]
    fn non_zero_exit_maps_to_push_code() {
        let err = map_push_error(PushError::ExitStatus {
            command: "npx drizzle-kit push".to_string(),
            code: 1,
        });
        assert_eq!(err.code(), ExitCode::PushFailed);
    }
}
