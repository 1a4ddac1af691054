//! UI preference persistence
//!
//! The dashboard's only durable state: one JSON blob under the fixed key
//! `app-store` in a sled database. Reporting records are never written here.

use std::path::Path;
use std::sync::Arc;

use crate::types::{Preferences, PreferencesUpdate};

/// Fixed key the preference blob is stored under.
pub const STORE_NAME: &str = "app-store";

/// Default database path, relative to the data directory.
pub const DEFAULT_DB_FILE: &str = "preferences.db";

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Sled-backed preference store.
#[derive(Clone)]
pub struct PreferencesStore {
    db: Arc<sled::Db>,
}

impl PreferencesStore {
    /// Open or create the preference database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PreferencesError> {
        let path_ref = path.as_ref();
        let db = sled::open(path_ref)?;
        tracing::info!(path = %path_ref.display(), "Preferences store opened");
        Ok(Self { db: Arc::new(db) })
    }

    /// Current preferences, or defaults when nothing has been saved.
    ///
    /// A corrupt blob is logged and treated as absent.
    pub fn load(&self) -> Result<Preferences, PreferencesError> {
        match self.db.get(STORE_NAME)? {
            Some(bytes) => match serde_json::from_slice::<Preferences>(&bytes) {
                Ok(prefs) => Ok(prefs),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored preferences unreadable, using defaults");
                    Ok(Preferences::default())
                }
            },
            None => Ok(Preferences::default()),
        }
    }

    /// Replace the stored blob.
    pub fn save(&self, prefs: &Preferences) -> Result<(), PreferencesError> {
        let bytes = serde_json::to_vec(prefs)?;
        self.db.insert(STORE_NAME, bytes)?;
        self.db.flush()?;
        tracing::debug!(?prefs, "Preferences saved");
        Ok(())
    }

    /// Apply a partial update and persist the result.
    pub fn update(&self, update: PreferencesUpdate) -> Result<Preferences, PreferencesError> {
        let mut prefs = self.load()?;
        prefs.apply(update);
        self.save(&prefs)?;
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, SyncStatus, Theme};

    #[test]
    fn test_empty_store_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::open(dir.path().join(DEFAULT_DB_FILE)).unwrap();
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn test_update_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DB_FILE);
        {
            let store = PreferencesStore::open(&path).unwrap();
            let updated = store
                .update(PreferencesUpdate {
                    language: Some(Language::Fr),
                    sync_status: Some(SyncStatus::Error),
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(updated.language, Language::Fr);
        }

        let reopened = PreferencesStore::open(&path).unwrap();
        let prefs = reopened.load().unwrap();
        assert_eq!(prefs.language, Language::Fr);
        assert_eq!(prefs.sync_status, SyncStatus::Error);
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::open(dir.path().join(DEFAULT_DB_FILE)).unwrap();
        store.db.insert(STORE_NAME, b"not json".to_vec()).unwrap();
        assert_eq!(store.load().unwrap(), Preferences::default());
    }
}
