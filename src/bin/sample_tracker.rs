//! Command-line front end for the sample tracker.
//!
//! Usage:
//!
//! ```text
//! sample-tracker [--config <path>] [--data-dir <dir>] <action> [options]
//! ```
//!
//! Actions mirror the tracker form: `register`, `send`, `return`, `view`,
//! `delete`, and `export`. Each invocation loads the table, applies one
//! action, and writes the table back. `export` writes CSV, or an xlsx
//! workbook for `--format xlsx` or an `.xlsx` output path. Rejections exit
//! with status 1 and store failures with status 2.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::{Parser, Subcommand, ValueEnum};
use mockable::DefaultClock;
use sample_tracker::config::{ConfigError, TrackerConfig};
use sample_tracker::sample::{
    adapters::csv::CsvFileStore,
    domain::{SampleColumn, SampleRecord, SampleTable},
    export::{ExportError, export_csv, export_xlsx},
    services::{
        DeleteSampleRequest, RegisterSampleRequest, ReturnSampleRequest, SampleLifecycleError,
        SampleLifecycleService, SendSampleRequest,
    },
};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

type TrackerService = SampleLifecycleService<CsvFileStore, DefaultClock>;

/// Sample tracker.
#[derive(Parser, Debug)]
#[command(name = "sample-tracker", about = "Track samples sent out to clients")]
struct Cli {
    /// Path to a JSON configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<Utf8PathBuf>,

    /// Directory holding the sample table (overrides the configuration).
    #[arg(long = "data-dir")]
    data_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Action {
    /// Register a new sample as in stock.
    Register {
        /// Serial number of the sample.
        serial: String,
        /// Model name.
        #[arg(long, default_value = "")]
        model: String,
        /// Part number.
        #[arg(long = "part-number", default_value = "")]
        part_number: String,
        /// Courier tracking number the sample arrived with.
        #[arg(long = "courier-id", default_value = "")]
        courier_id: String,
    },
    /// Send an in-stock sample to a client.
    Send {
        /// Serial number of the sample.
        serial: String,
        /// Client receiving the sample.
        #[arg(long, default_value = "")]
        client: String,
        /// What was shipped along with the sample.
        #[arg(long, default_value = "")]
        attachment: String,
    },
    /// Take a sent-out sample back into stock.
    Return {
        /// Serial number of the sample.
        serial: String,
        /// Courier tracking number of the return shipment.
        #[arg(long = "courier-id", default_value = "")]
        courier_id: String,
        /// What came back with the sample.
        #[arg(long, default_value = "")]
        attachment: String,
    },
    /// Show the current table, or one sample.
    View {
        /// Serial number to show; all samples when omitted.
        serial: Option<String>,
    },
    /// Delete a sample for good.
    Delete {
        /// Serial number of the sample.
        serial: String,
        /// Confirm the deletion.
        #[arg(long)]
        confirm: bool,
    },
    /// Write the current table as spreadsheet-friendly CSV or xlsx.
    Export {
        /// Destination file.
        #[arg(short = 'o', long = "output")]
        output: Utf8PathBuf,
        /// Output format; inferred from the file extension when omitted.
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    fn for_output(output: &Utf8Path) -> Self {
        match output.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Self::Xlsx,
            _ => Self::Csv,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open sample store: {0}")]
    StoreOpen(#[source] io::Error),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error(transparent)]
    Lifecycle(#[from] SampleLifecycleError),
    #[error("sample {0} does not exist")]
    UnknownSample(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    fn exit_status(&self) -> u8 {
        match self {
            Self::Lifecycle(err) if err.rejection_kind().is_some() => 1,
            Self::UnknownSample(_) => 1,
            _ => 2,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing more useful can be done if stderr itself is gone.
            let _ignored = writeln!(io::stderr().lock(), "{err}");
            ExitCode::from(err.exit_status())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.config.as_deref(), cli.data_dir)?;
    let store = config.open_store().map_err(CliError::StoreOpen)?;
    let service = SampleLifecycleService::new(Arc::new(store), Arc::new(DefaultClock))
        .with_settings(config.lifecycle_settings());

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    let mut out = io::stdout().lock();
    runtime.block_on(execute(&service, &config, cli.action, &mut out))
}

fn resolve_config(
    path: Option<&Utf8Path>,
    data_dir: Option<Utf8PathBuf>,
) -> Result<TrackerConfig, CliError> {
    let mut config = match path {
        Some(config_path) => TrackerConfig::load(config_path)?,
        None => TrackerConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

async fn execute(
    service: &TrackerService,
    config: &TrackerConfig,
    action: Action,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match action {
        Action::Register {
            serial,
            model,
            part_number,
            courier_id,
        } => {
            let request = RegisterSampleRequest::new(serial)
                .with_model(model)
                .with_part_number(part_number)
                .with_outbound_courier_id(courier_id);
            let record = service.register(request).await?;
            writeln!(out, "Sample {} registered", record.serial_number())?;
        }
        Action::Send {
            serial,
            client,
            attachment,
        } => {
            let request = SendSampleRequest::new(serial, client).with_attachment(attachment);
            let record = service.send(request).await?;
            writeln!(out, "Sample {} sent out", record.serial_number())?;
        }
        Action::Return {
            serial,
            courier_id,
            attachment,
        } => {
            let request = ReturnSampleRequest::new(serial)
                .with_courier_id(courier_id)
                .with_attachment(attachment);
            let record = service.return_sample(request).await?;
            writeln!(out, "Sample {} returned", record.serial_number())?;
        }
        Action::View { serial: None } => {
            let table = service.list().await?;
            out.write_all(render_table(table.records()).as_bytes())?;
        }
        Action::View {
            serial: Some(serial),
        } => {
            let record = service
                .find(&serial)
                .await?
                .ok_or_else(|| CliError::UnknownSample(serial.trim().to_owned()))?;
            out.write_all(render_table(std::slice::from_ref(&record)).as_bytes())?;
        }
        Action::Delete { serial, confirm } => {
            let request = DeleteSampleRequest::new(serial).confirmed(confirm);
            let record = service.delete(request).await?;
            writeln!(out, "Sample {} deleted", record.serial_number())?;
        }
        Action::Export { output, format } => {
            let table = service.list().await?;
            let chosen = format.unwrap_or_else(|| ExportFormat::for_output(&output));
            write_export(&output, &table, config, chosen)?;
            writeln!(out, "Exported {} samples to {output}", table.len())?;
        }
    }
    Ok(())
}

fn write_export(
    output: &Utf8Path,
    table: &SampleTable,
    config: &TrackerConfig,
    format: ExportFormat,
) -> Result<(), CliError> {
    let options = config.export_options();
    let bytes = match format {
        ExportFormat::Csv => export_csv(table, &options),
        ExportFormat::Xlsx => export_xlsx(table, &options)?,
    };
    let parent = match output.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = output.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name")
    })?;
    Dir::open_ambient_dir(parent, ambient_authority())?.write(file_name, bytes)?;
    Ok(())
}

/// Renders records as a column-aligned text table.
fn render_table(records: &[SampleRecord]) -> String {
    let header: Vec<String> = SampleColumn::ALL
        .iter()
        .map(|column| column.header().to_owned())
        .collect();
    let rows: Vec<Vec<String>> = records.iter().map(SampleRecord::to_row).collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut rendered = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        rendered.push_str(line.trim_end());
        rendered.push('\n');
    }
    rendered
}
