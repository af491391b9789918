use crate::{BookDraft, BookRecord, BookshelfError, ContentStore, RecordStore, Result, validate};
use std::sync::Arc;

#[derive(Clone)]
pub struct CreateBookOperation {
    record_store: Arc<RecordStore>,
    content_store: Arc<ContentStore>,
}

#[derive(Debug, Clone)]
pub struct CreateBookOperationRequest {
    pub draft: BookDraft,
}

#[derive(Debug, Clone)]
pub struct CreateBookOperationResult {
    pub position: usize,
    pub book: BookRecord,
}

#[derive(Debug, Clone)]
pub enum CreateBookOperationOutcome {
    Created(CreateBookOperationResult),
    Invalid(Vec<String>),
}

impl CreateBookOperation {
    pub fn new(record_store: Arc<RecordStore>, content_store: Arc<ContentStore>) -> Self {
        Self {
            record_store,
            content_store,
        }
    }

    /// Append a book and give it a placeholder blob.
    ///
    /// Metadata is saved before the blob is written. When the blob write fails the
    /// record stays in the collection and the call reports an internal inconsistency.
    pub async fn run(
        &self,
        request: CreateBookOperationRequest,
    ) -> Result<CreateBookOperationOutcome> {
        let CreateBookOperationRequest { draft } = request;

        let violations = validate(&draft);
        if !violations.is_empty() {
            return Ok(CreateBookOperationOutcome::Invalid(violations));
        }

        let book = draft.into_record();
        let mut books = self.record_store.load_all();
        books.push(book.clone());
        let position = books.len() - 1;
        self.record_store.save_all(&books)?;

        if let Err(error) = self.content_store.create_placeholder(position).await {
            tracing::error!(
                "Book created at position {} but its placeholder content failed: {}",
                position,
                error
            );
            return Err(BookshelfError::InternalInconsistency(format!(
                "book saved at position {} without content: {}",
                position, error
            )));
        }

        tracing::info!("Created book '{}' at position {}", book.title, position);
        Ok(CreateBookOperationOutcome::Created(CreateBookOperationResult {
            position,
            book,
        }))
    }
}
