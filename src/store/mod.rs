//! The photo record store: an ordered in-memory collection mirrored to a
//! single JSON file on every mutation.
//!
//! Ordering is most-recent-first; `add` prepends. Delete and update of an
//! unmatched id are silent no-ops. An empty collection is never written to
//! disk, so deleting down to zero leaves the previous file intact.

pub mod record;
pub mod seed;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use record::{CameraSettings, PhotoLocation, PhotoRecord, CATEGORIES, FALLBACK_CATEGORY};

pub struct PhotoStore {
    records: Vec<PhotoRecord>,
    path: PathBuf,
}

impl PhotoStore {
    /// Load a previously persisted collection from `path`. An absent or
    /// unparsable file seeds the fixed demonstration dataset instead; the
    /// parse failure is logged, never surfaced.
    pub fn load(path: &Path) -> Self {
        let records = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Vec<PhotoRecord>>(&content) {
                Ok(records) => {
                    tracing::info!(count = records.len(), "Loaded photo collection");
                    records
                }
                Err(e) => {
                    tracing::warn!("Stored collection unparsable, seeding demo data: {}", e);
                    seed::seed_records()
                }
            },
            Err(_) => {
                tracing::info!("No stored collection, seeding demo data");
                seed::seed_records()
            }
        };

        Self {
            records,
            path: path.to_path_buf(),
        }
    }

    /// Create a store from records already in memory, without touching disk.
    #[cfg(test)]
    pub fn with_records(records: Vec<PhotoRecord>, path: &Path) -> Self {
        Self {
            records,
            path: path.to_path_buf(),
        }
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PhotoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Prepend a record. The caller supplies a fresh id; no duplicate
    /// check is performed.
    pub fn add(&mut self, record: PhotoRecord) -> Result<()> {
        self.records.insert(0, record);
        self.persist()
    }

    /// Remove the record with matching id. No-op if absent.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            tracing::debug!(id, "delete: no matching record");
            return Ok(());
        }
        self.persist()
    }

    /// Replace the record whose id matches `record.id`. No-op if no match.
    pub fn update(&mut self, record: PhotoRecord) -> Result<()> {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                self.persist()
            }
            None => {
                tracing::debug!(id = %record.id, "update: no matching record");
                Ok(())
            }
        }
    }

    /// Write the full collection to disk. An empty collection is never
    /// persisted; this asymmetry keeps a delete-everything session from
    /// erasing the stored data.
    pub fn persist(&self) -> Result<()> {
        if self.records.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::debug!(count = self.records.len(), "Persisted photo collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::record::{CameraSettings, PhotoLocation, PhotoRecord};
    use super::*;
    use tempfile::TempDir;

    fn record(id: &str) -> PhotoRecord {
        PhotoRecord {
            id: id.to_string(),
            url: format!("https://example.com/{}.jpg", id),
            filename: format!("{}.jpg", id),
            upload_date: "2024-06-01".to_string(),
            capture_date: "2024-06-01 12:00".to_string(),
            location: PhotoLocation {
                lat: 1.5,
                lng: -2.5,
                name: "Test Bench".to_string(),
            },
            notes: "a test record".to_string(),
            tags: vec!["one".to_string(), "two".to_string()],
            category: "Travel".to_string(),
            metadata: CameraSettings {
                iso: Some(200),
                aperture: Some("f/4".to_string()),
                ..Default::default()
            },
        }
    }

    fn store_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("photos.json")
    }

    #[test]
    fn test_persist_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let mut store = PhotoStore::with_records(Vec::new(), &path);
        store.add(record("a")).unwrap();
        store.add(record("b")).unwrap();

        let reloaded = PhotoStore::load(&path);
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn test_add_prepends() {
        let dir = TempDir::new().unwrap();
        let mut store = PhotoStore::with_records(Vec::new(), &store_path(&dir));

        store.add(record("first")).unwrap();
        store.add(record("second")).unwrap();

        assert_eq!(store.records()[0].id, "second");
        assert_eq!(store.records()[1].id, "first");
    }

    #[test]
    fn test_delete_then_update_stays_absent() {
        let dir = TempDir::new().unwrap();
        let mut store = PhotoStore::with_records(Vec::new(), &store_path(&dir));
        store.add(record("a")).unwrap();
        store.add(record("b")).unwrap();

        store.delete("a").unwrap();
        let mut edited = record("a");
        edited.notes = "resurrected?".to_string();
        store.update(edited).unwrap();

        assert!(store.get("a").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = PhotoStore::with_records(vec![record("a")], &store_path(&dir));
        store.delete("missing").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let mut store = PhotoStore::with_records(Vec::new(), &store_path(&dir));
        store.add(record("a")).unwrap();
        store.add(record("b")).unwrap();

        let mut edited = record("a");
        edited.notes = "edited".to_string();
        store.update(edited).unwrap();

        // Position preserved, content replaced
        assert_eq!(store.records()[1].id, "a");
        assert_eq!(store.records()[1].notes, "edited");
    }

    #[test]
    fn test_empty_collection_never_persisted() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let mut store = PhotoStore::with_records(Vec::new(), &path);
        store.add(record("only")).unwrap();
        assert!(path.exists());

        store.delete("only").unwrap();

        // The file still holds the last non-empty state
        let reloaded = PhotoStore::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records()[0].id, "only");
    }

    #[test]
    fn test_malformed_file_falls_back_to_seed() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);
        std::fs::write(&path, "{not json").unwrap();

        let store = PhotoStore::load(&path);
        assert_eq!(store.len(), seed::seed_records().len());
    }

    #[test]
    fn test_absent_file_falls_back_to_seed() {
        let dir = TempDir::new().unwrap();
        let store = PhotoStore::load(&store_path(&dir));
        assert_eq!(store.records(), seed::seed_records().as_slice());
    }
}
