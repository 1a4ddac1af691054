//! Report table search and sort

use std::cmp::Ordering;

use crate::types::{CellValue, JoinedRow, ReportField};

/// Keep rows where any rendered field contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_rows(rows: Vec<JoinedRow>, query: &str) -> Vec<JoinedRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            ReportField::ALL
                .iter()
                .any(|&f| row.cell(f).to_string().to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort by one field. Empty cells always sort last.
pub fn sort_rows(rows: &mut [JoinedRow], field: ReportField, descending: bool) {
    rows.sort_by(|a, b| {
        let (a, b) = (a.cell(field), b.cell(field));
        match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_cells(&a, &b);
                if descending {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    });
}

fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        _ => a.to_string().to_lowercase().cmp(&b.to_string().to_lowercase()),
    }
}
