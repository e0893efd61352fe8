use crate::error::{FailureKind, StatementFailure};
use async_trait::async_trait;
use core::time::Duration;

/// Runs one piece of migration SQL against a database.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<(), StatementFailure>;
}

/// An executor that owns its connection and has to give it back.
#[async_trait]
pub trait Session: StatementExecutor {
    async fn release(self);
}

// SQLSTATE class 42 "duplicate_*" conditions.
const DUPLICATE_OBJECT_CODES: &[&str] = &[
    "42P03", // duplicate_cursor
    "42P04", // duplicate_database
    "42723", // duplicate_function
    "42P05", // duplicate_prepared_statement
    "42P06", // duplicate_schema
    "42P07", // duplicate_table
    "42712", // duplicate_alias
    "42710", // duplicate_object
    "42701", // duplicate_column
];

pub fn classify_sqlstate(code: Option<&str>) -> FailureKind {
    match code {
        Some(code) if DUPLICATE_OBJECT_CODES.contains(&code) => FailureKind::AlreadyExists,
        _ => FailureKind::Fatal,
    }
}

pub fn statement_kind(sql: &str) -> String {
    let token = sql
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("--"))
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_ascii_alphabetic());

    if token.is_empty() {
        return "UNKNOWN".to_string();
    }

    token.to_ascii_uppercase()
}

pub fn duration_ms(d: Duration) -> i32 {
    let ms = d.as_millis();
    if ms > i32::MAX as u128 {
        i32::MAX
    } else {
        ms as i32
    }
}

pub fn sql_snippet(sql: &str) -> String {
    const MAX_CHARS: usize = 200;
    let trimmed = sql.trim();

    let mut out = String::with_capacity(trimmed.len().min(MAX_CHARS) + 1);
    for (i, ch) in trimmed.chars().enumerate() {
        if i >= MAX_CHARS {
            out.push('…');
            break;
        }

        match ch {
            '\n' | '\r' | '\t' => out.push(' '),
            _ => out.push(ch),
        }
    }

    out
}
