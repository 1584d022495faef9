//! Tracker configuration.
//!
//! Configuration is an optional JSON document. Every field has a default, so
//! an empty object (or no file at all) yields a working setup that keeps
//! `samples.csv` and `samples_backup.csv` in the current directory.
//!
//! ```json
//! {
//!   "data_dir": "/var/lib/sample-tracker",
//!   "table_file": "samples.csv",
//!   "backup_file": "samples_backup.csv",
//!   "resend_policy": "clear_return_history",
//!   "load_policy": "fail_open",
//!   "export": {
//!     "text_columns": ["SerialNumber", "PartNumber"],
//!     "byte_order_mark": true
//!   }
//! }
//! ```

use crate::sample::{
    adapters::csv::CsvFileStore,
    domain::{ResendPolicy, SampleColumn},
    export::{DEFAULT_TEXT_COLUMNS, ExportOptions},
    services::{LifecycleSettings, LoadPolicy},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::io;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid JSON for [`TrackerConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Export section of [`TrackerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Columns written as forced text.
    pub text_columns: Vec<SampleColumn>,
    /// Whether exports start with a UTF-8 byte-order mark.
    pub byte_order_mark: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            text_columns: DEFAULT_TEXT_COLUMNS.to_vec(),
            byte_order_mark: true,
        }
    }
}

/// Top-level tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Directory holding the table and backup files.
    pub data_dir: Utf8PathBuf,
    /// Table file name, relative to `data_dir`.
    pub table_file: Utf8PathBuf,
    /// Backup file name, relative to `data_dir`; `null` disables backups.
    pub backup_file: Option<Utf8PathBuf>,
    /// Treatment of return history on a new send.
    pub resend_policy: ResendPolicy,
    /// Treatment of load failures.
    pub load_policy: LoadPolicy,
    /// Export options.
    pub export: ExportConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from("."),
            table_file: Utf8PathBuf::from("samples.csv"),
            backup_file: Some(Utf8PathBuf::from("samples_backup.csv")),
            resend_policy: ResendPolicy::default(),
            load_policy: LoadPolicy::default(),
            export: ExportConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Parses configuration from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read or
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let bytes = read_config_file(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    /// Returns the service settings described by this configuration.
    #[must_use]
    pub const fn lifecycle_settings(&self) -> LifecycleSettings {
        LifecycleSettings {
            resend_policy: self.resend_policy,
            load_policy: self.load_policy,
        }
    }

    /// Returns the export options described by this configuration.
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_text_columns(self.export.text_columns.iter().copied())
            .with_byte_order_mark(self.export.byte_order_mark)
    }

    /// Opens the CSV store described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the data directory cannot be created or
    /// opened.
    pub fn open_store(&self) -> io::Result<CsvFileStore> {
        let store = CsvFileStore::open(&self.data_dir, self.table_file.clone())?;
        Ok(match &self.backup_file {
            Some(backup) => store.with_backup(backup.clone()),
            None => store,
        })
    }
}

fn read_config_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "config path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read(file_name)
}
