//! Spreadsheet export of the sample table, as CSV or as an xlsx workbook.
//!
//! The CSV export differs from the stored file: it starts with a byte-order
//! mark so spreadsheet programs detect UTF-8 and prefixes designated columns
//! with a tab so long serial and courier numbers stay text. Cells in the
//! remaining columns that a spreadsheet would evaluate as formulas get a
//! leading `'`, which the spreadsheet shows literally. Text columns never get
//! the `'`, so keys such as `-SN12` or `+86` courier numbers keep their value
//! apart from the tab.
//!
//! The xlsx export writes every value as a string cell, with the text number
//! format (`@`) on the designated columns. String cells are never evaluated,
//! so no value is altered.

use crate::sample::{
    adapters::csv::codec::{BYTE_ORDER_MARK, write_rows},
    domain::{SampleColumn, SampleTable},
};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

/// Worksheet name used by [`export_xlsx`].
pub const WORKSHEET_NAME: &str = "Samples";

/// Errors raised while building an xlsx export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The workbook writer rejected the data.
    #[error("spreadsheet could not be written: {0}")]
    Xlsx(#[from] XlsxError),

    /// The table does not fit a worksheet.
    #[error("table has too many rows for a worksheet: {0}")]
    TooManyRows(usize),
}

/// Columns exported as forced text unless configured otherwise.
pub const DEFAULT_TEXT_COLUMNS: [SampleColumn; 4] = [
    SampleColumn::SerialNumber,
    SampleColumn::PartNumber,
    SampleColumn::OutboundCourierId,
    SampleColumn::ReturnCourierId,
];

/// Options controlling [`export_csv`] and [`export_xlsx`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    text_columns: Vec<SampleColumn>,
    byte_order_mark: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            text_columns: DEFAULT_TEXT_COLUMNS.to_vec(),
            byte_order_mark: true,
        }
    }
}

impl ExportOptions {
    /// Replaces the set of forced-text columns.
    #[must_use]
    pub fn with_text_columns(mut self, columns: impl IntoIterator<Item = SampleColumn>) -> Self {
        self.text_columns = columns.into_iter().collect();
        self
    }

    /// Enables or disables the leading byte-order mark.
    #[must_use]
    pub const fn with_byte_order_mark(mut self, enabled: bool) -> Self {
        self.byte_order_mark = enabled;
        self
    }

    /// Returns the forced-text columns.
    #[must_use]
    pub fn text_columns(&self) -> &[SampleColumn] {
        &self.text_columns
    }

    fn forces_text(&self, column: SampleColumn) -> bool {
        self.text_columns.contains(&column)
    }
}

/// Renders the table as downloadable CSV bytes.
#[must_use]
pub fn export_csv(table: &SampleTable, options: &ExportOptions) -> Vec<u8> {
    let header = SampleColumn::ALL.map(SampleColumn::header);
    let body = table.records().iter().map(|record| {
        SampleColumn::ALL
            .into_iter()
            .map(|column| export_cell(&record.cell(column), options.forces_text(column)))
            .collect::<Vec<_>>()
    });

    let mut out = String::new();
    if options.byte_order_mark {
        out.push(BYTE_ORDER_MARK);
    }
    out.push_str(&write_rows([header]));
    out.push_str(&write_rows(body));
    out.into_bytes()
}

/// Renders the table as an xlsx workbook with one worksheet.
///
/// # Errors
///
/// Returns [`ExportError::TooManyRows`] when the table exceeds the worksheet
/// row limit, or [`ExportError::Xlsx`] when the workbook cannot be written.
pub fn export_xlsx(table: &SampleTable, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let text = Format::new().set_num_format("@");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(WORKSHEET_NAME)?;

    for (col, column) in (0_u16..).zip(SampleColumn::ALL) {
        sheet.write_string(0, col, column.header())?;
    }
    for (index, record) in table.records().iter().enumerate() {
        let row = index
            .checked_add(1)
            .and_then(|number| u32::try_from(number).ok())
            .ok_or(ExportError::TooManyRows(table.len()))?;
        for (col, column) in (0_u16..).zip(SampleColumn::ALL) {
            let value = record.cell(column);
            if options.forces_text(column) {
                sheet.write_string_with_format(row, col, &value, &text)?;
            } else if !value.is_empty() {
                sheet.write_string(row, col, &value)?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

fn export_cell(value: &str, force_text: bool) -> String {
    if value.is_empty() {
        String::new()
    } else if force_text {
        format!("\t{value}")
    } else {
        neutralize_formula(value)
    }
}

fn neutralize_formula(value: &str) -> String {
    let starts_formula = matches!(value.chars().next(), Some('=' | '+' | '-' | '@'));
    if starts_formula {
        format!("'{value}")
    } else {
        value.to_owned()
    }
}
