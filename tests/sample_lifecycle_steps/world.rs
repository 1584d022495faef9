//! Shared world state for sample lifecycle BDD scenarios.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use mockable::DefaultClock;
use rstest::fixture;
use sample_tracker::sample::{
    adapters::csv::CsvFileStore,
    domain::{SampleRecord, SampleTable},
    services::{SampleLifecycleError, SampleLifecycleService},
};
use tempfile::TempDir;

/// Service type used by the BDD world.
pub type TestSampleService = SampleLifecycleService<CsvFileStore, DefaultClock>;

/// Table file name inside the scenario data directory.
pub const TABLE_FILE: &str = "samples.csv";

/// Backup file name inside the scenario data directory.
pub const BACKUP_FILE: &str = "samples_backup.csv";

/// Three-row table as a spreadsheet program leaves it after an edit.
pub const EDITED_SHEET: &str = "\
Model,SerialNumber,PartNumber,OutboundCourierID,Status,SentAt,SentToClient,SentAttachment,ReceivedAt,ReturnCourierID,ReturnAttachment
X1,SN-1,,,InStock,,,,,,
X2,SN-2,,,SentOut,2024/1/5 10:00,Acme,,,,
X3,SN-3,,,InStock,,,,,,
";

/// Scenario world for sample lifecycle behaviour tests.
pub struct SampleLifecycleWorld {
    pub data_dir: TempDir,
    pub store: Arc<CsvFileStore>,
    pub service: TestSampleService,
    pub last_result: Option<Result<SampleRecord, SampleLifecycleError>>,
    pub last_view: Option<SampleTable>,
    pub seeded_table: Option<String>,
    pub seeded_backup: Option<String>,
}

impl SampleLifecycleWorld {
    /// Creates a world backed by a fresh temporary data directory.
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("create scenario data directory");
        let store = Arc::new(
            CsvFileStore::open(&utf8_path(&data_dir), TABLE_FILE)
                .expect("open scenario sample store")
                .with_backup(BACKUP_FILE),
        );
        let service = SampleLifecycleService::new(Arc::clone(&store), Arc::new(DefaultClock));

        Self {
            data_dir,
            store,
            service,
            last_result: None,
            last_view: None,
            seeded_table: None,
            seeded_backup: None,
        }
    }

    /// Writes the table and backup files directly, remembering their text.
    ///
    /// # Errors
    ///
    /// Returns an error when either file cannot be written.
    pub fn seed_files(&mut self, table: String, backup: String) -> std::io::Result<()> {
        std::fs::write(self.file_path(TABLE_FILE), &table)?;
        std::fs::write(self.file_path(BACKUP_FILE), &backup)?;
        self.seeded_table = Some(table);
        self.seeded_backup = Some(backup);
        Ok(())
    }

    /// Returns the path of `file_name` inside the scenario data directory.
    #[must_use]
    pub fn file_path(&self, file_name: &str) -> Utf8PathBuf {
        utf8_path(&self.data_dir).join(file_name)
    }
}

impl Default for SampleLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn utf8_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8Path::from_path(dir.path())
        .expect("temporary directory path is UTF-8")
        .to_owned()
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SampleLifecycleWorld {
    SampleLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
