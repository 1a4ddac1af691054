//! Record Store
//!
//! In-memory, append-only collections for the four record kinds. The store
//! performs no validation (submissions are checked at the HTTP boundary before
//! they get here) and never fails: `append` pushes, `list` returns the full
//! sequence in insertion order.
//!
//! The store is an explicit value. Callers construct it and hand it to
//! whatever needs it; the HTTP layer wraps it in [`SharedStore`], whose
//! `RwLock` is the single serialization point for appends.

pub mod preferences;
pub mod seed;

pub use preferences::{PreferencesError, PreferencesStore};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::{
    CoreSample, DrillingRecord, MaintenanceLog, ProgressReport, RecordCounts, RecordKind,
};

/// Store handle shared between API handlers.
pub type SharedStore = Arc<RwLock<RecordStore>>;

/// A record type that lives in one of the store's collections.
pub trait StoredRecord: Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    fn collection(store: &RecordStore) -> &Vec<Self>;

    fn collection_mut(store: &mut RecordStore) -> &mut Vec<Self>;
}

/// Append-only collections of submitted records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    drilling: Vec<DrillingRecord>,
    core_samples: Vec<CoreSample>,
    progress: Vec<ProgressReport>,
    maintenance: Vec<MaintenanceLog>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in the shared handle used by the API.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Append a record to its collection, preserving insertion order.
    pub fn append<R: StoredRecord>(&mut self, record: R) {
        let collection = R::collection_mut(self);
        collection.push(record);
        tracing::debug!(kind = %R::KIND, len = collection.len(), "Record appended");
    }

    /// All records of one kind, oldest first.
    pub fn list<R: StoredRecord>(&self) -> &[R] {
        R::collection(self)
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Drilling => self.drilling.len(),
            RecordKind::CoreSample => self.core_samples.len(),
            RecordKind::Progress => self.progress.len(),
            RecordKind::Maintenance => self.maintenance.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        RecordKind::ALL.iter().all(|&k| self.len(k) == 0)
    }

    pub fn counts(&self) -> RecordCounts {
        RecordCounts {
            drilling: self.drilling.len(),
            core_samples: self.core_samples.len(),
            progress: self.progress.len(),
            maintenance: self.maintenance.len(),
        }
    }

    pub fn drilling_records(&self) -> &[DrillingRecord] {
        &self.drilling
    }

    pub fn core_samples(&self) -> &[CoreSample] {
        &self.core_samples
    }

    pub fn progress_reports(&self) -> &[ProgressReport] {
        &self.progress
    }

    pub fn maintenance_logs(&self) -> &[MaintenanceLog] {
        &self.maintenance
    }
}

impl StoredRecord for DrillingRecord {
    const KIND: RecordKind = RecordKind::Drilling;

    fn collection(store: &RecordStore) -> &Vec<Self> {
        &store.drilling
    }

    fn collection_mut(store: &mut RecordStore) -> &mut Vec<Self> {
        &mut store.drilling
    }
}

impl StoredRecord for CoreSample {
    const KIND: RecordKind = RecordKind::CoreSample;

    fn collection(store: &RecordStore) -> &Vec<Self> {
        &store.core_samples
    }

    fn collection_mut(store: &mut RecordStore) -> &mut Vec<Self> {
        &mut store.core_samples
    }
}

impl StoredRecord for ProgressReport {
    const KIND: RecordKind = RecordKind::Progress;

    fn collection(store: &RecordStore) -> &Vec<Self> {
        &store.progress
    }

    fn collection_mut(store: &mut RecordStore) -> &mut Vec<Self> {
        &mut store.progress
    }
}

impl StoredRecord for MaintenanceLog {
    const KIND: RecordKind = RecordKind::Maintenance;

    fn collection(store: &RecordStore) -> &Vec<Self> {
        &store.maintenance
    }

    fn collection_mut(store: &mut RecordStore) -> &mut Vec<Self> {
        &mut store.maintenance
    }
}
