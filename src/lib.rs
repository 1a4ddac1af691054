//! drillbook: diamond-drilling field data entry and reporting
//!
//! Field crews submit drilling, core-sample, progress and maintenance records;
//! the service keeps them in memory, derives the joined report table and chart
//! data, and exports date-filtered field selections to xlsx.
//!
//! ## Architecture
//!
//! - **Record Store** (`store`): append-only in-memory collections, injected
//!   as an explicit value
//! - **Record Joiner** (`reports::join`): first-match left join by site
//! - **Aggregator** (`reports::aggregate`): categorical counts for charts
//! - **Export Formatter** (`export`): date filter, field projection, xlsx
//! - **API** (`api`): axum HTTP surface over the above

pub mod api;
pub mod config;
pub mod export;
pub mod reports;
pub mod store;
pub mod submission;
pub mod types;

pub use config::AppConfig;
pub use store::{RecordStore, SharedStore};
pub use types::{
    CoreSample, DrillingRecord, JoinedRow, MaintenanceLog, ProgressReport, RecordKind,
    ReportField,
};
