use crate::checksum::sha256_hex;
use crate::error::MigrationDiscoveryError;
use crate::model::MigrationFile;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Collects the `.sql` files directly inside `dir`, ordered by filename.
///
/// Sub-directories (such as a generator's `meta/` journal) and other files
/// are ignored.
pub fn discover_migrations(
    dir: impl AsRef<Path>,
) -> Result<Vec<MigrationFile>, MigrationDiscoveryError> {
    let dir = dir.as_ref();
    let dir_display = dir.display().to_string();

    let entries = fs::read_dir(dir).map_err(|e| MigrationDiscoveryError::Io {
        path: dir_display.clone(),
        message: e.to_string(),
    })?;

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MigrationDiscoveryError::Io {
            path: dir_display.clone(),
            message: e.to_string(),
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().to_string();
        if !filename.ends_with(".sql") {
            tracing::debug!(file = %filename, "skipping non-sql file");
            continue;
        }

        files.push((filename, path));
    }

    if files.is_empty() {
        return Err(MigrationDiscoveryError::EmptyMigrationsDir { dir: dir_display });
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut seen: HashMap<u64, String> = HashMap::new();
    let mut out = Vec::with_capacity(files.len());

    for (filename, path) in files {
        let prefix = numeric_prefix(&filename);
        if let Some(prefix) = prefix {
            if let Some(first) = seen.insert(prefix, filename.clone()) {
                return Err(MigrationDiscoveryError::DuplicatePrefix {
                    prefix,
                    first,
                    second: filename,
                });
            }
        }

        out.push(read_migration(filename, path, prefix)?);
    }

    Ok(out)
}

/// Loads one migration file given directly on the command line.
pub fn load_migration_file(
    path: impl AsRef<Path>,
) -> Result<MigrationFile, MigrationDiscoveryError> {
    let path = path.as_ref();

    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| MigrationDiscoveryError::Io {
            path: path.display().to_string(),
            message: "missing filename".to_string(),
        })?;

    if !filename.ends_with(".sql") {
        return Err(MigrationDiscoveryError::NotSqlFile {
            path: path.display().to_string(),
        });
    }

    let prefix = numeric_prefix(&filename);
    read_migration(filename, path.to_path_buf(), prefix)
}

fn read_migration(
    filename: String,
    path: PathBuf,
    prefix: Option<u64>,
) -> Result<MigrationFile, MigrationDiscoveryError> {
    let bytes = fs::read(&path).map_err(|e| MigrationDiscoveryError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let checksum = sha256_hex(&bytes);
    let sql = String::from_utf8(bytes).map_err(|e| MigrationDiscoveryError::Io {
        path: path.display().to_string(),
        message: format!("file is not valid UTF-8: {e}"),
    })?;

    Ok(MigrationFile::new(filename, path, prefix, checksum, sql))
}

fn numeric_prefix(filename: &str) -> Option<u64> {
    let (head, _) = filename.split_once('_')?;
    if head.is_empty() || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}
