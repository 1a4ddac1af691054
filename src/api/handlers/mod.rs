//! API route handlers
//!
//! - `status`: liveness and record counts
//! - `records`: list / append for the four record kinds
//! - `reports`: joined table, chart distributions, dashboard summary
//! - `export`: xlsx download of the joined report
//! - `preferences`: persisted UI preferences

mod export;
mod preferences;
mod records;
mod reports;
mod status;

pub use export::*;
pub use preferences::*;
pub use records::*;
pub use reports::*;
pub use status::*;

use chrono::{DateTime, Utc};

use crate::store::{PreferencesStore, RecordStore, SharedStore};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    /// Record collections; the lock serializes appends
    pub store: SharedStore,
    /// Preference persistence, absent when the database could not be opened
    pub preferences: Option<PreferencesStore>,
    pub started_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            preferences: None,
            started_at: Utc::now(),
        }
    }

    pub fn with_preferences(mut self, preferences: PreferencesStore) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Empty store, no preference database.
    pub fn in_memory() -> Self {
        Self::new(RecordStore::new().into_shared())
    }
}
