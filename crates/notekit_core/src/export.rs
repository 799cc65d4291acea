//! Dated JSON backup writer shared by both stores.
//!
//! # Responsibility
//! - Name backup files `<prefix>-<YYYY-MM-DD>.json` using the UTC date.
//! - Write payloads atomically, creating the target directory on demand.
//!
//! # Invariants
//! - Two exports on the same UTC day overwrite the same file.

use chrono::{NaiveDate, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Error for backup export operations.
#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize backup payload: {err}"),
            Self::Io(err) => write!(f, "failed to write backup file: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Returns `<prefix>-<YYYY-MM-DD>.json` for today's UTC date.
pub fn backup_file_name(prefix: &str) -> String {
    file_name_for_date(prefix, Utc::now().date_naive())
}

fn file_name_for_date(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.json", date.format("%Y-%m-%d"))
}

/// Writes `payload` to `<dir>/<file_name>` atomically and returns the path.
pub fn write_backup(dir: &Path, file_name: &str, payload: &str) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(payload.as_bytes())?;
    tmp.persist(&path).map_err(|err| ExportError::Io(err.error))?;
    Ok(path)
}
