//! CSV-file sample store with a backup copy.

use super::codec::{decode_table, encode_table};
use crate::sample::{
    domain::SampleTable,
    ports::{SampleStore, SampleStoreError, SampleStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;
use tracing::debug;

/// Sample store persisting the table as a CSV file inside one directory.
///
/// Every save rewrites the table file in full, then writes the same bytes to
/// the backup file when one is configured. Nothing keeps the two files
/// consistent beyond that ordering. A recovered save writes the table file
/// only, so the backup keeps the last table that was read.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    dir: Arc<Dir>,
    table_file: Utf8PathBuf,
    backup_file: Option<Utf8PathBuf>,
}

impl CsvFileStore {
    /// Opens (creating if needed) `data_dir` and stores the table in
    /// `table_file` relative to it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(data_dir: &Utf8Path, table_file: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        Dir::create_ambient_dir_all(data_dir, ambient_authority())?;
        let dir = Dir::open_ambient_dir(data_dir, ambient_authority())?;
        Ok(Self::from_dir(dir, table_file))
    }

    /// Stores the table in `table_file` inside an already opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir, table_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir),
            table_file: table_file.into(),
            backup_file: None,
        }
    }

    /// Also writes every save to `backup_file` in the same directory.
    #[must_use]
    pub fn with_backup(mut self, backup_file: impl Into<Utf8PathBuf>) -> Self {
        self.backup_file = Some(backup_file.into());
        self
    }

    /// Returns the table file path, relative to the store directory.
    #[must_use]
    pub fn table_file(&self) -> &Utf8Path {
        &self.table_file
    }

    /// Returns the backup file path, if any.
    #[must_use]
    pub fn backup_file(&self) -> Option<&Utf8Path> {
        self.backup_file.as_deref()
    }

    async fn write(
        &self,
        table: &SampleTable,
        backup: Option<Utf8PathBuf>,
    ) -> SampleStoreResult<()> {
        let text = encode_table(table);
        let dir = Arc::clone(&self.dir);
        let path = self.table_file.clone();
        tokio::task::spawn_blocking(move || {
            write_table_text(&dir, &path, backup.as_deref(), &text)
        })
        .await
        .map_err(SampleStoreError::unavailable)?
        .map_err(SampleStoreError::unavailable)
    }
}

fn read_table_bytes(dir: &Dir, path: &Utf8Path) -> io::Result<Option<Vec<u8>>> {
    match dir.read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

fn write_table_text(
    dir: &Dir,
    path: &Utf8Path,
    backup: Option<&Utf8Path>,
    text: &str,
) -> io::Result<()> {
    dir.write(path, text)?;
    if let Some(backup_path) = backup {
        dir.write(backup_path, text)?;
    }
    Ok(())
}

#[async_trait]
impl SampleStore for CsvFileStore {
    async fn load(&self) -> SampleStoreResult<SampleTable> {
        let dir = Arc::clone(&self.dir);
        let path = self.table_file.clone();
        let bytes = tokio::task::spawn_blocking(move || read_table_bytes(&dir, &path))
            .await
            .map_err(SampleStoreError::unavailable)?
            .map_err(SampleStoreError::unavailable)?;

        let Some(contents) = bytes else {
            debug!(file = %self.table_file, "sample table file absent; starting empty");
            return Ok(SampleTable::new());
        };
        let text = String::from_utf8(contents)
            .map_err(|err| SampleStoreError::decode(0, format!("table is not UTF-8: {err}")))?;
        let table = decode_table(&text)?;
        debug!(file = %self.table_file, rows = table.len(), "loaded sample table");
        Ok(table)
    }

    async fn save(&self, table: &SampleTable) -> SampleStoreResult<()> {
        self.write(table, self.backup_file.clone()).await?;
        debug!(file = %self.table_file, rows = table.len(), "saved sample table");
        Ok(())
    }

    async fn save_recovered(&self, table: &SampleTable) -> SampleStoreResult<()> {
        self.write(table, None).await?;
        debug!(
            file = %self.table_file,
            rows = table.len(),
            "saved recovered sample table; backup left as is"
        );
        Ok(())
    }
}
