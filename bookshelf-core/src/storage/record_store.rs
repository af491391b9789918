use crate::error::Result;
use crate::model::BookRecord;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// RecordStore owns the JSON file holding the ordered book collection.
///
/// All calls are blocking and replace the whole collection. Callers serialize
/// load/modify/save sequences themselves.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection.
    ///
    /// A missing or unreadable file yields an empty collection so the service keeps
    /// running; the failure is logged.
    pub fn load_all(&self) -> Vec<BookRecord> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("Collection file {:?} does not exist yet", self.path);
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(
                    "Failed to read collection file {:?}, using empty collection: {}",
                    self.path,
                    error
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<BookRecord>>(&data) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(
                    "Collection file {:?} is not a valid book array, using empty collection: {}",
                    self.path,
                    error
                );
                Vec::new()
            }
        }
    }

    /// Persist the full collection, replacing the previous file atomically.
    pub fn save_all(&self, records: &[BookRecord]) -> Result<()> {
        let payload = serde_json::to_vec_pretty(records)?;

        // Write to temporary file first, then rename for atomicity
        let temp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&payload)?;
        file.sync_all()?;
        drop(file);

        if let Err(error) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(error.into());
        }

        tracing::debug!("Saved {} records to {:?}", records.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookDraft;

    fn record(title: &str) -> BookRecord {
        BookDraft::new(title, "Author", "Summary", "2024-01-01").into_record()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(temp_dir.path().join("books.json")).unwrap();

        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(temp_dir.path().join("nested").join("books.json")).unwrap();

        let records = vec![record("First"), record("Second")];
        store.save_all(&records).unwrap();

        assert_eq!(store.load_all(), records);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("books.json");
        fs::write(&path, b"[{\"title\": \"cut off").unwrap();

        let store = RecordStore::new(path).unwrap();
        assert!(store.load_all().is_empty());

        // A save after recovery replaces the corrupt content.
        store.save_all(&[record("Recovered")]).unwrap();
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn test_file_keeps_interoperable_key_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(temp_dir.path().join("books.json")).unwrap();
        store.save_all(&[record("Keys")]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        let entry = &raw.as_array().unwrap()[0];
        for key in ["title", "author", "summary", "publishDate"] {
            assert!(entry.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_save_fails_when_directory_is_gone() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("gone");
        let store = RecordStore::new(dir.join("books.json")).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert!(store.save_all(&[record("Lost")]).is_err());
    }
}
