use crate::mode::ExecutionMode;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Succeeded,
    AlreadyExists {
        code: Option<String>,
        message: String,
    },
    Failed {
        code: Option<String>,
        message: String,
    },
    /// Dry-run: recorded but not sent to the database.
    Planned,
}

impl ExecutionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionResult::Succeeded => "ok",
            ExecutionResult::AlreadyExists { .. } => "exists",
            ExecutionResult::Failed { .. } => "failed",
            ExecutionResult::Planned => "planned",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ExecutionResult::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOutcome {
    pub ordinal: usize,
    pub kind: String,
    pub execution_time_ms: i32,
    pub result: ExecutionResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub filename: String,
    pub checksum: String,
    pub outcomes: Vec<StatementOutcome>,
}

impl FileReport {
    pub fn is_complete(&self) -> bool {
        !self.outcomes.iter().any(|o| o.result.is_failed())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub mode: ExecutionMode,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            mode,
            files: Vec::new(),
        }
    }

    pub fn files_completed(&self) -> usize {
        self.files.iter().filter(|f| f.is_complete()).count()
    }

    pub fn statements(&self) -> usize {
        self.files.iter().map(|f| f.outcomes.len()).sum()
    }

    pub fn already_existed(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o.result, ExecutionResult::AlreadyExists { .. }))
            .count()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &StatementOutcome> {
        self.files.iter().flat_map(|f| f.outcomes.iter())
    }
}
