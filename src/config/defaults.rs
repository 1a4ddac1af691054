//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// Bind address when neither config nor `DRILLBOOK_SERVER_ADDR` set one.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Request body limit for record submissions (bytes).
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Per-request timeout for API handlers (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Seed Data
// ============================================================================

/// Generated records per kind on startup.
///
/// 20 per kind matches the dashboard's placeholder data set.
pub const SEED_RECORDS_PER_KIND: usize = 20;

/// Upper bound on generated records per kind.
pub const MAX_SEED_RECORDS_PER_KIND: usize = 100_000;

// ============================================================================
// Export
// ============================================================================

/// Sheet name of the exported workbook.
pub const DEFAULT_SHEET_NAME: &str = "Drilling Report";

/// File name prefix; the ISO-8601 timestamp and `.xlsx` are appended.
pub const DEFAULT_FILE_PREFIX: &str = "drilling-report";

/// Export window when the caller gives no dates: the last 30 days.
pub const DEFAULT_EXPORT_WINDOW_DAYS: u32 = 30;

/// Excel's limit on worksheet name length.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

// ============================================================================
// Storage
// ============================================================================

/// Directory holding the preference database.
pub const DEFAULT_DATA_DIR: &str = "./data";
