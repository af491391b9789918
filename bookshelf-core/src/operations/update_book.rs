use crate::{BookDraft, BookRecord, RecordStore, Result, validate};
use std::sync::Arc;

#[derive(Clone)]
pub struct UpdateBookOperation {
    record_store: Arc<RecordStore>,
}

#[derive(Debug, Clone)]
pub struct UpdateBookOperationRequest {
    pub position: usize,
    pub draft: BookDraft,
}

#[derive(Debug, Clone)]
pub struct UpdateBookOperationResult {
    pub position: usize,
    pub book: BookRecord,
}

#[derive(Debug, Clone)]
pub enum UpdateBookOperationOutcome {
    Updated(UpdateBookOperationResult),
    Invalid(Vec<String>),
    NotFound,
}

impl UpdateBookOperation {
    pub fn new(record_store: Arc<RecordStore>) -> Self {
        Self { record_store }
    }

    /// Replace the book at a position. Validation runs before the bounds check and the
    /// content blob is left alone.
    pub fn run(&self, request: UpdateBookOperationRequest) -> Result<UpdateBookOperationOutcome> {
        let UpdateBookOperationRequest { position, draft } = request;

        let violations = validate(&draft);
        if !violations.is_empty() {
            return Ok(UpdateBookOperationOutcome::Invalid(violations));
        }

        let mut books = self.record_store.load_all();
        let Some(slot) = books.get_mut(position) else {
            return Ok(UpdateBookOperationOutcome::NotFound);
        };

        let book = draft.into_record();
        *slot = book.clone();
        self.record_store.save_all(&books)?;

        tracing::info!("Updated book at position {}", position);
        Ok(UpdateBookOperationOutcome::Updated(UpdateBookOperationResult {
            position,
            book,
        }))
    }
}
