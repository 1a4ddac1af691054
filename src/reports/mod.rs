//! Derived reporting views
//!
//! Everything here reads store snapshots and never writes back:
//! - `join`: drilling records joined to progress and core by site
//! - `aggregate`: categorical counts for the pie charts
//! - `summary`: dashboard KPI cards and the monthly progress series
//! - `table`: search and sort for the report table

pub mod aggregate;
pub mod join;
pub mod summary;
pub mod table;

pub use aggregate::{
    count_by, count_by_sorted, maintenance_status_distribution, rock_type_distribution,
};
pub use join::join_by_site;
pub use summary::{dashboard_summary, monthly_progress};
pub use table::{filter_rows, sort_rows};

use crate::store::RecordStore;
use crate::types::JoinedRow;

/// Join the store's current drilling, progress and core collections.
pub fn joined_rows(store: &RecordStore) -> Vec<JoinedRow> {
    join_by_site(
        store.drilling_records(),
        store.progress_reports(),
        store.core_samples(),
    )
}
