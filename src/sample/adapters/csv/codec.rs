//! Text codec between [`SampleTable`] and comma-separated values.
//!
//! Writing always emits the canonical header. Reading matches columns by
//! header name, accepts legacy headers, and tolerates a leading byte-order
//! mark, so sheets exported by older tools load unchanged.

use crate::sample::{
    domain::{
        PersistedSampleData, RecordedAt, SampleColumn, SampleRecord, SampleStatus, SampleTable,
        SerialNumber,
    },
    ports::SampleStoreError,
};
use std::collections::HashMap;
use thiserror::Error;

/// UTF-8 byte-order mark.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Low-level syntax error in comma-separated text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CsvSyntaxError {
    /// A quoted field was still open at end of input.
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote {
        /// One-based line where the quote opened.
        line: usize,
    },
}

/// Quotes `value` when it contains a delimiter, quote, or line break.
#[must_use]
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Joins rows of cells into comma-separated text, one line per row.
#[must_use]
pub fn write_rows<R, C>(rows: impl IntoIterator<Item = R>) -> String
where
    R: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    let mut out = String::new();
    for row in rows {
        let line = row
            .into_iter()
            .map(|cell| escape_field(cell.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Splits comma-separated text into rows of unquoted cells.
///
/// Accepts `\n` and `\r\n` line endings and quoted fields spanning lines.
///
/// # Errors
///
/// Returns [`CsvSyntaxError::UnterminatedQuote`] when a quoted field never
/// closes.
pub fn parse_rows(input: &str) -> Result<Vec<Vec<String>>, CsvSyntaxError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1_usize;
    let mut quote_line = 1_usize;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                line += 1;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CsvSyntaxError::UnterminatedQuote { line: quote_line });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}

/// Encodes the whole table, header first.
#[must_use]
pub fn encode_table(table: &SampleTable) -> String {
    let header = SampleColumn::ALL.map(SampleColumn::header);
    let body = table.records().iter().map(SampleRecord::to_row);
    let mut out = write_rows([header]);
    out.push_str(&write_rows(body));
    out
}

/// Decodes a stored table.
///
/// Blank input, or a header with no data rows, decodes to an empty table.
/// Rows whose cells are all blank are skipped. Unknown columns are ignored
/// and missing optional columns read as blank.
///
/// # Errors
///
/// Returns [`SampleStoreError::Decode`] when the text is not valid CSV, the
/// header lacks the `SerialNumber` or `Status` column, or a row holds a
/// blank serial number, an unknown status, or a malformed timestamp.
pub fn decode_table(input: &str) -> Result<SampleTable, SampleStoreError> {
    let text = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
    let rows = parse_rows(text).map_err(|err| SampleStoreError::decode(0, err.to_string()))?;
    let mut rows_iter = rows.into_iter();
    let Some(header) = rows_iter.next() else {
        return Ok(SampleTable::new());
    };
    let layout = HeaderLayout::from_header(&header)?;

    let mut records = Vec::new();
    for (offset, row) in rows_iter.enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        // Header is row 1.
        let row_number = offset + 2;
        records.push(layout.decode_row(&row, row_number)?);
    }
    Ok(SampleTable::from_records(records))
}

/// Column positions resolved from a header row.
struct HeaderLayout {
    positions: HashMap<SampleColumn, usize>,
}

impl HeaderLayout {
    fn from_header(header: &[String]) -> Result<Self, SampleStoreError> {
        let mut positions = HashMap::new();
        for (index, name) in header.iter().enumerate() {
            if let Some(column) = SampleColumn::from_header(name) {
                positions.entry(column).or_insert(index);
            }
        }
        for required in [SampleColumn::SerialNumber, SampleColumn::Status] {
            if !positions.contains_key(&required) {
                return Err(SampleStoreError::decode(
                    1,
                    format!("missing required column {required}"),
                ));
            }
        }
        Ok(Self { positions })
    }

    fn cell(&self, row: &[String], column: SampleColumn) -> String {
        self.positions
            .get(&column)
            .and_then(|index| row.get(*index))
            .map(|value| value.trim().to_owned())
            .unwrap_or_default()
    }

    fn decode_row(
        &self,
        row: &[String],
        row_number: usize,
    ) -> Result<SampleRecord, SampleStoreError> {
        let fail =
            |err: &dyn std::error::Error| SampleStoreError::decode(row_number, err.to_string());

        let serial_number = SerialNumber::new(self.cell(row, SampleColumn::SerialNumber))
            .map_err(|err| fail(&err))?;
        let status = SampleStatus::try_from(self.cell(row, SampleColumn::Status).as_str())
            .map_err(|err| fail(&err))?;
        let sent_at = RecordedAt::parse_optional(&self.cell(row, SampleColumn::SentAt))
            .map_err(|err| fail(&err))?;
        let received_at = RecordedAt::parse_optional(&self.cell(row, SampleColumn::ReceivedAt))
            .map_err(|err| fail(&err))?;

        Ok(SampleRecord::from_persisted(PersistedSampleData {
            serial_number,
            model: self.cell(row, SampleColumn::Model),
            part_number: self.cell(row, SampleColumn::PartNumber),
            outbound_courier_id: self.cell(row, SampleColumn::OutboundCourierId),
            status,
            sent_at,
            sent_to_client: self.cell(row, SampleColumn::SentToClient),
            sent_attachment: self.cell(row, SampleColumn::SentAttachment),
            received_at,
            return_courier_id: self.cell(row, SampleColumn::ReturnCourierId),
            return_attachment: self.cell(row, SampleColumn::ReturnAttachment),
        }))
    }
}
