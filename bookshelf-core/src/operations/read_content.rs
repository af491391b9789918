use crate::{ContentStore, ReadMode, RecordStore, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReadContentOperation {
    record_store: Arc<RecordStore>,
    content_store: Arc<ContentStore>,
}

#[derive(Debug, Clone)]
pub struct ReadContentOperationRequest {
    pub position: usize,
    pub mode: ReadMode,
}

#[derive(Debug, Clone)]
pub struct ReadContentOperationResult {
    pub content: String,
    pub mode: ReadMode,
}

#[derive(Debug, Clone)]
pub enum ReadContentOperationOutcome {
    Found(ReadContentOperationResult),
    NotFound,
}

impl ReadContentOperation {
    pub fn new(record_store: Arc<RecordStore>, content_store: Arc<ContentStore>) -> Self {
        Self {
            record_store,
            content_store,
        }
    }

    pub async fn run(
        &self,
        request: ReadContentOperationRequest,
    ) -> Result<ReadContentOperationOutcome> {
        let ReadContentOperationRequest { position, mode } = request;

        if position >= self.record_store.load_all().len() {
            return Ok(ReadContentOperationOutcome::NotFound);
        }

        match self.content_store.read(position, mode).await {
            Ok(content) => Ok(ReadContentOperationOutcome::Found(
                ReadContentOperationResult { content, mode },
            )),
            Err(error) if error.is_not_found() => Ok(ReadContentOperationOutcome::NotFound),
            Err(error) => Err(error),
        }
    }
}
