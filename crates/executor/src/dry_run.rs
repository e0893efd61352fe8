use crate::mode::ExecutionMode;
use crate::report::{ExecutionResult, FileReport, RunReport, StatementOutcome};
use crate::statement::statement_kind;
use plank_migration::MigrationFile;

/// Splits every file and records each statement as planned, without a database.
pub fn plan(files: &[MigrationFile]) -> RunReport {
    let mut report = RunReport::new(ExecutionMode::DryRun);

    for file in files {
        let outcomes = file
            .statements()
            .into_iter()
            .map(|stmt| StatementOutcome {
                ordinal: stmt.ordinal,
                kind: statement_kind(&stmt.sql),
                execution_time_ms: 0,
                result: ExecutionResult::Planned,
            })
            .collect();

        report.files.push(FileReport {
            filename: file.filename.clone(),
            checksum: file.checksum.clone(),
            outcomes,
        });
    }

    report
}
