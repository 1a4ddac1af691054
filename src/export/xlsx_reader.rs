use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use super::{ExportError, ExportTable, ROW_COUNT_NAME};
use crate::types::{CellValue, ReportField};

/// Read an exported workbook back into its projected table.
///
/// Only the first sheet is read. Header labels (or accessor keys) map back to
/// report fields; any other header is rejected. Workbooks written by
/// [`write_table`](super::write_table) are padded back to their stored row
/// count.
pub fn read_export(bytes: &[u8]) -> Result<ExportTable, ExportError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ExportError::InvalidFormat("Workbook contains no sheets".to_string()))?;
    let stored_rows = stored_row_count(workbook.defined_names());
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ExportError::InvalidFormat("Sheet has no header row".to_string()))?;

    let fields = header
        .iter()
        .map(|cell| match cell {
            Data::String(label) => label
                .parse::<ReportField>()
                .map_err(|_| ExportError::InvalidFormat(format!("unknown column '{label}'"))),
            other => Err(ExportError::InvalidFormat(format!(
                "non-text header cell {other:?}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows: Vec<Vec<CellValue>> = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(to_cell).collect();
            cells.resize(fields.len(), CellValue::Empty);
            cells
        })
        .collect();

    // Trailing all-empty rows are outside the used range
    if let Some(count) = stored_rows {
        if count > rows.len() {
            rows.resize(count, vec![CellValue::Empty; fields.len()]);
        }
    }

    Ok(ExportTable { fields, rows })
}

/// Data row count recorded by the writer, if this workbook came from one.
fn stored_row_count(names: &[(String, String)]) -> Option<usize> {
    names
        .iter()
        .find(|(name, _)| name == ROW_COUNT_NAME)
        .and_then(|(_, formula)| formula.trim().trim_start_matches('=').parse().ok())
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Text(format!("{e:?}")),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
