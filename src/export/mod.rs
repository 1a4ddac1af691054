//! Export Formatter
//!
//! Filters report rows to an inclusive date range, projects the selected
//! fields in the caller's order, and serializes the result as a single-sheet
//! xlsx workbook. Rows whose date is missing or unparsable are dropped
//! silently, the same as rows outside the range.

mod xlsx_reader;
mod xlsx_writer;

pub use xlsx_reader::read_export;
pub use xlsx_writer::write_table;

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::types::{parse_flexible_date, CellValue, JoinedRow, ReportField};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("no fields selected for export")]
    NoFields,

    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("{requested} fields selected, a sheet holds at most {max} columns")]
    TooManyColumns { requested: usize, max: usize },

    #[error("invalid export file: {0}")]
    InvalidFormat(String),
}

/// Excel's column limit per worksheet.
pub const MAX_EXPORT_COLUMNS: usize = 16_384;

/// Workbook-level name holding the number of exported data rows.
pub const ROW_COUNT_NAME: &str = "ExportRowCount";

// ============================================================================
// Exportable Rows
// ============================================================================

/// A row the export formatter can filter and project.
pub trait ExportRow {
    /// Calendar date used for range filtering. `None` excludes the row.
    fn row_date(&self) -> Option<NaiveDate>;

    fn cell(&self, field: ReportField) -> CellValue;
}

impl ExportRow for JoinedRow {
    fn row_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn cell(&self, field: ReportField) -> CellValue {
        JoinedRow::cell(self, field)
    }
}

/// Loose JSON row, keyed by field accessor keys (`location.latitude` walks
/// into the nested object).
impl ExportRow for Map<String, Value> {
    fn row_date(&self) -> Option<NaiveDate> {
        self.get("date")
            .and_then(Value::as_str)
            .and_then(parse_flexible_date)
    }

    fn cell(&self, field: ReportField) -> CellValue {
        let mut parts = field.key().split('.');
        let mut current = parts.next().and_then(|first| self.get(first));
        for part in parts {
            current = current.and_then(|v| v.get(part));
        }
        match current {
            None | Some(Value::Null) => CellValue::Empty,
            Some(Value::Bool(b)) => CellValue::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
            Some(Value::String(s)) => CellValue::text(s),
            Some(other) => CellValue::Text(other.to_string()),
        }
    }
}

// ============================================================================
// Date Range
// ============================================================================

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ExportError> {
        if start > end {
            return Err(ExportError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days` days ending at `today`, inclusive of both ends.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Projected export content: header fields plus one cell vector per row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub fields: Vec<ReportField>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ExportTable {
    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.label()).collect()
    }
}

/// Keep in-range rows and project `fields` in the given order.
pub fn project_rows<R: ExportRow>(rows: &[R], range: DateRange, fields: &[ReportField]) -> ExportTable {
    let projected = rows
        .iter()
        .filter(|row| row.row_date().is_some_and(|d| range.contains(d)))
        .map(|row| fields.iter().map(|&f| row.cell(f)).collect())
        .collect();
    ExportTable {
        fields: fields.to_vec(),
        rows: projected,
    }
}

/// Filter, project and serialize `rows` to xlsx bytes.
pub fn build_export<R: ExportRow>(
    rows: &[R],
    range: DateRange,
    fields: &[ReportField],
    sheet_name: &str,
) -> Result<Vec<u8>, ExportError> {
    if fields.is_empty() {
        return Err(ExportError::NoFields);
    }
    if fields.len() > MAX_EXPORT_COLUMNS {
        return Err(ExportError::TooManyColumns {
            requested: fields.len(),
            max: MAX_EXPORT_COLUMNS,
        });
    }
    let table = project_rows(rows, range, fields);
    tracing::info!(
        from = %range.start,
        to = %range.end,
        fields = fields.len(),
        input_rows = rows.len(),
        exported_rows = table.rows.len(),
        "Building export"
    );
    write_table(&table, sheet_name)
}

/// `<prefix>-<ISO-8601 timestamp>.xlsx`
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}-{}.xlsx", now.to_rfc3339_opts(SecondsFormat::Millis, true))
}
