use crate::error::PersistError;
use crate::resolve::ConnectionConfig;
use crate::DATABASE_URL;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Somewhere a resolved connection string can be saved for later invocations.
pub trait SettingsSink {
    fn name(&self) -> String;

    fn persist(&self, config: &ConnectionConfig) -> Result<(), PersistError>;
}

/// Appends `DATABASE_URL=...` to a dotenv-style settings file.
#[derive(Debug, Clone)]
pub struct DotenvFileSink {
    path: PathBuf,
}

impl DotenvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses `contents` the way the start-up loader will, so keys inside
    /// quoted multi-line values do not count.
    fn defines_database_url(&self, contents: &str) -> Result<bool, PersistError> {
        for item in dotenvy::from_read_iter(contents.as_bytes()) {
            let (key, _) = item.map_err(|e| PersistError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
            if key == DATABASE_URL {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl SettingsSink for DotenvFileSink {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn persist(&self, config: &ConnectionConfig) -> Result<(), PersistError> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(PersistError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        if self.defines_database_url(&existing)? {
            tracing::debug!(path = %self.path.display(), "settings file already defines {DATABASE_URL}");
            return Ok(());
        }

        let mut line = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            line.push('\n');
        }
        line.push_str(&format!("{DATABASE_URL}={}\n", config.url()));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PersistError::Write {
                path: self.path.clone(),
                source: e,
            })?;

        file.write_all(line.as_bytes())
            .map_err(|e| PersistError::Write {
                path: self.path.clone(),
                source: e,
            })
    }
}

/// Applies each sink to an assembled config, logging failures instead of
/// returning them. Returns how many sinks succeeded.
///
/// Configs that already came from `DATABASE_URL` or the command line are not
/// written anywhere.
pub fn persist_best_effort(sinks: &[&dyn SettingsSink], config: &ConnectionConfig) -> usize {
    if !config.provenance().is_assembled() {
        return 0;
    }

    let mut persisted = 0usize;
    for sink in sinks {
        match sink.persist(config) {
            Ok(()) => {
                tracing::info!(sink = %sink.name(), "persisted {DATABASE_URL}");
                persisted += 1;
            }
            Err(err) => {
                tracing::warn!(sink = %sink.name(), error = %err, "could not persist {DATABASE_URL}");
            }
        }
    }

    persisted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Provenance;

    fn assembled() -> ConnectionConfig {
        ConnectionConfig::new(
            "postgresql://u:p@h:5432/d?sslmode=require",
            Provenance::Assembled {
                host: "h".to_string(),
                port: 5432,
                database: "d".to_string(),
                user: "u".to_string(),
            },
        )
    }

    struct FailingSink;

    impl SettingsSink for FailingSink {
        fn name(&self) -> String {
            "failing".to_string()
        }

        fn persist(&self, _config: &ConnectionConfig) -> Result<(), PersistError> {
            Err(PersistError::Write {
                path: PathBuf::from("/nowhere"),
                source: std::io::Error::other("read-only"),
            })
        }
    }

    #[test]
    fn creates_settings_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        DotenvFileSink::new(&path).persist(&assembled()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "DATABASE_URL=postgresql://u:p@h:5432/d?sslmode=require\n"
        );
    }

    #[test]
    fn appends_after_unterminated_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "SESSION_SECRET=abc").unwrap();

        DotenvFileSink::new(&path).persist(&assembled()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "SESSION_SECRET=abc\nDATABASE_URL=postgresql://u:p@h:5432/d?sslmode=require\n"
        );
    }

    #[test]
    fn existing_definition_is_left_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        for existing in [
            "DATABASE_URL=postgres://keep/me\n",
            "# local\nexport DATABASE_URL=\"postgres://keep/me\"\n",
        ] {
            fs::write(&path, existing).unwrap();

            DotenvFileSink::new(&path).persist(&assembled()).unwrap();

            assert_eq!(fs::read_to_string(&path).unwrap(), existing);
        }
    }

    #[test]
    fn key_inside_quoted_value_is_not_a_definition() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        let existing = "NOTE=\"first line\nDATABASE_URL=inside a quoted value\"\n";
        fs::write(&path, existing).unwrap();

        DotenvFileSink::new(&path).persist(&assembled()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            format!("{existing}DATABASE_URL=postgresql://u:p@h:5432/d?sslmode=require\n")
        );
    }

    #[test]
    fn unparsable_file_is_not_touched() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "NOTE=\"never closed\n").unwrap();

        let err = DotenvFileSink::new(&path).persist(&assembled()).unwrap_err();
        assert!(matches!(err, PersistError::Parse { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "NOTE=\"never closed\n");
    }

    #[test]
    fn failures_do_not_stop_other_sinks() {
        let tmp = tempfile::tempdir().unwrap();
        let file = DotenvFileSink::new(tmp.path().join(".env"));
        let sinks: [&dyn SettingsSink; 2] = [&FailingSink, &file];

        assert_eq!(persist_best_effort(&sinks, &assembled()), 1);
        assert!(file.path().exists());
    }

    #[test]
    fn explicit_configs_are_not_persisted() {
        let tmp = tempfile::tempdir().unwrap();
        let file = DotenvFileSink::new(tmp.path().join(".env"));
        let cfg = ConnectionConfig::new(
            "postgres://x/y",
            Provenance::Explicit {
                variable: DATABASE_URL,
            },
        );

        let sinks: [&dyn SettingsSink; 1] = [&file];
        assert_eq!(persist_best_effort(&sinks, &cfg), 0);
        assert!(!file.path().exists());
    }
}
