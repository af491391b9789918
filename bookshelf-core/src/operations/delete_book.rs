use crate::{BookRecord, BookshelfError, ContentStore, RecordStore, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct DeleteBookOperation {
    record_store: Arc<RecordStore>,
    content_store: Arc<ContentStore>,
}

#[derive(Debug, Clone)]
pub struct DeleteBookOperationRequest {
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct DeleteBookOperationResult {
    pub position: usize,
    pub book: BookRecord,
    pub blobs_shifted: usize,
}

#[derive(Debug, Clone)]
pub enum DeleteBookOperationOutcome {
    Deleted(DeleteBookOperationResult),
    NotFound,
}

impl DeleteBookOperation {
    pub fn new(record_store: Arc<RecordStore>, content_store: Arc<ContentStore>) -> Self {
        Self {
            record_store,
            content_store,
        }
    }

    /// Remove a book, its blob, and renumber the blobs of every later book so each
    /// remaining book keeps its own content.
    pub async fn run(
        &self,
        request: DeleteBookOperationRequest,
    ) -> Result<DeleteBookOperationOutcome> {
        let DeleteBookOperationRequest { position } = request;

        let mut books = self.record_store.load_all();
        if position >= books.len() {
            return Ok(DeleteBookOperationOutcome::NotFound);
        }

        let len_before = books.len();
        let book = books.remove(position);
        self.record_store.save_all(&books)?;

        let blobs_shifted = self
            .remove_blob(position, len_before)
            .await
            .map_err(|error| {
                tracing::error!(
                    "Book at position {} deleted but its content files are inconsistent: {}",
                    position,
                    error
                );
                BookshelfError::InternalInconsistency(format!(
                    "book at position {} deleted, content cleanup failed: {}",
                    position, error
                ))
            })?;

        tracing::info!(
            "Deleted book '{}' at position {} ({} blobs shifted)",
            book.title,
            position,
            blobs_shifted
        );
        Ok(DeleteBookOperationOutcome::Deleted(DeleteBookOperationResult {
            position,
            book,
            blobs_shifted,
        }))
    }

    async fn remove_blob(&self, position: usize, len_before: usize) -> Result<usize> {
        self.content_store.delete(position).await?;
        self.content_store
            .shift_down_after(position, len_before)
            .await
    }
}
