use rust_xlsxwriter::{Format, Workbook};

use super::{ExportError, ExportTable, MAX_EXPORT_COLUMNS, ROW_COUNT_NAME};
use crate::types::CellValue;

/// Serialize `table` into a single-sheet workbook: a bold header row of field
/// labels, then one row per projected record.
///
/// The data row count is stored as the workbook name [`ROW_COUNT_NAME`].
/// Trailing rows with no values leave no cells behind, so the reader needs it
/// to restore them.
pub fn write_table(table: &ExportTable, sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let too_wide = || ExportError::TooManyColumns {
        requested: table.fields.len(),
        max: MAX_EXPORT_COLUMNS,
    };
    if table.fields.len() > MAX_EXPORT_COLUMNS {
        return Err(too_wide());
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, field) in table.fields.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| too_wide())?;
        worksheet.write_string_with_format(0, col, field.label(), &header_format)?;
        worksheet.set_column_width(col, (field.label().len() as f64).max(12.0))?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(row_idx + 1)
            .map_err(|_| ExportError::InvalidFormat(format!("{row_idx} rows exceed the sheet")))?;
        for (col, cell) in row.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| too_wide())?;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) if s.is_empty() => {}
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
            }
        }
    }

    workbook.define_name(ROW_COUNT_NAME, &format!("={}", table.rows.len()))?;

    Ok(workbook.save_to_buffer()?)
}
