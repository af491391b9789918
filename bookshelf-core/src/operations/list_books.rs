use crate::{BookRecord, RecordStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct ListBooksOperation {
    record_store: Arc<RecordStore>,
}

#[derive(Debug, Clone)]
pub struct ListBooksOperationResult {
    pub books: Vec<BookRecord>,
}

impl ListBooksOperation {
    pub fn new(record_store: Arc<RecordStore>) -> Self {
        Self { record_store }
    }

    pub fn run(&self) -> ListBooksOperationResult {
        ListBooksOperationResult {
            books: self.record_store.load_all(),
        }
    }
}
