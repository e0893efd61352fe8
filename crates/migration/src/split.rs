use crate::model::Statement;

/// Marker placed between statements by the schema tool's migration generator.
pub const STATEMENT_BREAKPOINT: &str = "--> statement-breakpoint";

/// Splits migration text on [`STATEMENT_BREAKPOINT`].
///
/// `n` markers always yield `n + 1` statements; text without a marker is a
/// single statement.
pub fn split_statements(sql: &str) -> Vec<Statement> {
    sql.split(STATEMENT_BREAKPOINT)
        .enumerate()
        .map(|(idx, piece)| Statement {
            ordinal: idx + 1,
            sql: piece.trim().to_string(),
        })
        .collect()
}
