use crate::error::{BookshelfError, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub const CONTENT_REQUIRED: &str = "Content cannot be empty";

/// How a content read is performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadMode {
    /// Read on the calling thread with std::fs.
    Blocking,
    /// Read through tokio::fs, yielding to the scheduler.
    #[default]
    NonBlocking,
}

impl ReadMode {
    /// Parse a client supplied mode. Anything other than `blocking` reads non-blocking.
    pub fn parse(mode: Option<&str>) -> Self {
        match mode.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("blocking") => Self::Blocking,
            _ => Self::NonBlocking,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::NonBlocking => "non-blocking",
        }
    }
}

/// Derive the blob file name for a record position.
///
/// The name carries the 1-based ordinal: position 0 maps to `content_1`.
pub fn blob_name(position: usize) -> String {
    format!("content_{}", position + 1)
}

/// Initial text written for a freshly created record.
pub fn placeholder_text(position: usize) -> String {
    format!("Content for book {}", position + 1)
}

/// ContentStore keeps one text file per record under a single directory.
pub struct ContentStore {
    base_path: PathBuf,
}

impl ContentStore {
    pub fn new(base_path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn blob_path(&self, position: usize) -> PathBuf {
        self.base_path.join(blob_name(position))
    }

    pub fn exists(&self, position: usize) -> bool {
        self.blob_path(position).is_file()
    }

    pub async fn read(&self, position: usize, mode: ReadMode) -> Result<String> {
        match mode {
            ReadMode::Blocking => self.read_blocking(position),
            ReadMode::NonBlocking => self.read_non_blocking(position).await,
        }
    }

    pub fn read_blocking(&self, position: usize) -> Result<String> {
        let blob_path = self.blob_path(position);
        std::fs::read_to_string(&blob_path).map_err(|error| map_read_error(position, error))
    }

    pub async fn read_non_blocking(&self, position: usize) -> Result<String> {
        let blob_path = self.blob_path(position);
        fs::read_to_string(&blob_path)
            .await
            .map_err(|error| map_read_error(position, error))
    }

    /// Replace the blob for `position`. Empty content is rejected before any I/O.
    pub async fn write(&self, position: usize, content: &str) -> Result<()> {
        if content.is_empty() {
            return Err(BookshelfError::Validation(vec![CONTENT_REQUIRED.to_string()]));
        }

        let blob_path = self.blob_path(position);
        let temp_path = blob_path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &blob_path).await?;

        tracing::debug!(
            "Stored {} bytes in {} (position {})",
            content.len(),
            blob_name(position),
            position
        );
        Ok(())
    }

    pub async fn create_placeholder(&self, position: usize) -> Result<()> {
        self.write(position, &placeholder_text(position)).await
    }

    /// Remove the blob for `position`. A missing file is not an error.
    pub async fn delete(&self, position: usize) -> Result<()> {
        match fs::remove_file(self.blob_path(position)).await {
            Ok(()) => {
                tracing::debug!("Deleted {}", blob_name(position));
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    /// Move every blob after `position` one ordinal down.
    ///
    /// `len_before` is the collection length before the record at `position` was
    /// removed. Must run after the blob at `position` is gone. Missing files are skipped.
    pub async fn shift_down_after(&self, position: usize, len_before: usize) -> Result<usize> {
        let mut moved = 0;
        for source in (position + 1)..len_before {
            let from = self.blob_path(source);
            let to = self.blob_path(source - 1);
            match fs::rename(&from, &to).await {
                Ok(()) => moved += 1,
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    tracing::warn!("No blob {} to shift down, skipping", blob_name(source));
                }
                Err(error) => return Err(error.into()),
            }
        }

        tracing::debug!("Shifted {} blobs after position {}", moved, position);
        Ok(moved)
    }
}

fn map_read_error(position: usize, error: std::io::Error) -> BookshelfError {
    if error.kind() == ErrorKind::NotFound {
        BookshelfError::NotFound(format!("content for book at position {}", position))
    } else {
        BookshelfError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ContentStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(temp_dir.path().join("content")).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_blob_name_uses_ordinal() {
        assert_eq!(blob_name(0), "content_1");
        assert_eq!(blob_name(41), "content_42");
    }

    #[test]
    fn test_read_mode_parse() {
        assert_eq!(ReadMode::parse(Some("blocking")), ReadMode::Blocking);
        assert_eq!(ReadMode::parse(Some("BLOCKING")), ReadMode::Blocking);
        assert_eq!(ReadMode::parse(Some("non-blocking")), ReadMode::NonBlocking);
        assert_eq!(ReadMode::parse(Some("sideways")), ReadMode::NonBlocking);
        assert_eq!(ReadMode::parse(None), ReadMode::NonBlocking);
    }

    #[tokio::test]
    async fn test_write_and_read_both_modes() {
        let (_temp_dir, store) = store();

        store.write(2, "chapter one").await.unwrap();
        assert!(store.base_path().join("content_3").is_file());

        assert_eq!(store.read(2, ReadMode::Blocking).await.unwrap(), "chapter one");
        assert_eq!(store.read(2, ReadMode::NonBlocking).await.unwrap(), "chapter one");
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let (_temp_dir, store) = store();

        assert!(store.read_blocking(0).unwrap_err().is_not_found());
        assert!(store.read_non_blocking(0).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_empty_content_is_rejected() {
        let (_temp_dir, store) = store();

        let error = store.write(0, "").await.unwrap_err();
        assert!(matches!(error, BookshelfError::Validation(_)));
        assert!(!store.exists(0));
    }

    #[tokio::test]
    async fn test_placeholder_and_idempotent_delete() {
        let (_temp_dir, store) = store();

        store.create_placeholder(0).await.unwrap();
        assert_eq!(store.read_blocking(0).unwrap(), "Content for book 1");

        store.delete(0).await.unwrap();
        assert!(!store.exists(0));
        store.delete(0).await.unwrap();
    }

    #[tokio::test]
    async fn test_shift_down_after() {
        let (_temp_dir, store) = store();
        for position in 0..4 {
            store.write(position, &format!("blob {}", position)).await.unwrap();
        }

        store.delete(1).await.unwrap();
        let moved = store.shift_down_after(1, 4).await.unwrap();

        assert_eq!(moved, 2);
        assert_eq!(store.read_blocking(0).unwrap(), "blob 0");
        assert_eq!(store.read_blocking(1).unwrap(), "blob 2");
        assert_eq!(store.read_blocking(2).unwrap(), "blob 3");
        assert!(!store.exists(3));
    }

    #[tokio::test]
    async fn test_shift_skips_missing_blobs() {
        let (_temp_dir, store) = store();
        store.write(0, "blob 0").await.unwrap();
        store.write(3, "blob 3").await.unwrap();

        store.delete(0).await.unwrap();
        let moved = store.shift_down_after(0, 4).await.unwrap();

        assert_eq!(moved, 1);
        assert!(!store.exists(0));
        assert!(!store.exists(1));
        assert_eq!(store.read_blocking(2).unwrap(), "blob 3");
    }
}
