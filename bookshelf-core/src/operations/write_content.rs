use crate::storage::content_store::CONTENT_REQUIRED;
use crate::{ContentStore, RecordStore, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct WriteContentOperation {
    record_store: Arc<RecordStore>,
    content_store: Arc<ContentStore>,
}

#[derive(Debug, Clone)]
pub struct WriteContentOperationRequest {
    pub position: usize,
    pub content: String,
}

#[derive(Debug, Clone)]
pub enum WriteContentOperationOutcome {
    Written,
    Invalid(Vec<String>),
    NotFound,
}

impl WriteContentOperation {
    pub fn new(record_store: Arc<RecordStore>, content_store: Arc<ContentStore>) -> Self {
        Self {
            record_store,
            content_store,
        }
    }

    pub async fn run(
        &self,
        request: WriteContentOperationRequest,
    ) -> Result<WriteContentOperationOutcome> {
        let WriteContentOperationRequest { position, content } = request;

        if content.is_empty() {
            return Ok(WriteContentOperationOutcome::Invalid(vec![
                CONTENT_REQUIRED.to_string(),
            ]));
        }

        if position >= self.record_store.load_all().len() {
            return Ok(WriteContentOperationOutcome::NotFound);
        }

        self.content_store.write(position, &content).await?;
        Ok(WriteContentOperationOutcome::Written)
    }
}
