use crate::operations::{
    CreateBookOperation, CreateBookOperationOutcome, CreateBookOperationRequest,
    CreateBookOperationResult, DeleteBookOperation, DeleteBookOperationOutcome,
    DeleteBookOperationRequest, DeleteBookOperationResult, ListBooksOperation,
    ReadContentOperation, ReadContentOperationOutcome, ReadContentOperationRequest,
    ReadContentOperationResult, UpdateBookOperation, UpdateBookOperationOutcome,
    UpdateBookOperationRequest, UpdateBookOperationResult, WriteContentOperation,
    WriteContentOperationOutcome, WriteContentOperationRequest,
};
use crate::{BookDraft, BookRecord, BookshelfError, ContentStore, ReadMode, RecordStore, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinError;

type BlobLocks = Mutex<HashMap<usize, Arc<Mutex<()>>>>;

/// RecordService is the entry point a transport layer talks to.
///
/// Mutating operations hold `layout_lock` exclusively for the whole
/// load/modify/save/blob sequence. Content reads and writes hold it shared, and
/// writes to one blob are further serialized by a per-position lock.
///
/// Create and delete touch both stores across await points, so they run on a
/// spawned task that owns the layout guard. Dropping the caller's future does not
/// stop them halfway.
pub struct RecordService {
    record_store: Arc<RecordStore>,
    content_store: Arc<ContentStore>,
    layout_lock: Arc<RwLock<()>>,
    blob_locks: Arc<BlobLocks>,
}

impl RecordService {
    pub fn new(record_store: RecordStore, content_store: ContentStore) -> Self {
        Self {
            record_store: Arc::new(record_store),
            content_store: Arc::new(content_store),
            layout_lock: Arc::new(RwLock::new(())),
            blob_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn open(collection_path: PathBuf, content_dir: PathBuf) -> Result<Self> {
        let record_store = RecordStore::new(collection_path)?;
        let content_store = ContentStore::new(content_dir)?;
        Ok(Self::new(record_store, content_store))
    }

    pub fn content_store(&self) -> &ContentStore {
        &self.content_store
    }

    pub async fn list_all(&self) -> Vec<BookRecord> {
        let _layout = self.layout_lock.read().await;
        ListBooksOperation::new(self.record_store.clone()).run().books
    }

    pub async fn create(&self, draft: BookDraft) -> Result<CreateBookOperationResult> {
        let layout = self.layout_lock.clone().write_owned().await;
        let operation =
            CreateBookOperation::new(self.record_store.clone(), self.content_store.clone());

        let task = tokio::spawn(async move {
            let _layout = layout;
            operation.run(CreateBookOperationRequest { draft }).await
        });

        match task.await.map_err(task_failed)?? {
            CreateBookOperationOutcome::Created(result) => Ok(result),
            CreateBookOperationOutcome::Invalid(violations) => {
                Err(BookshelfError::Validation(violations))
            }
        }
    }

    pub async fn update(
        &self,
        position: usize,
        draft: BookDraft,
    ) -> Result<UpdateBookOperationResult> {
        let _layout = self.layout_lock.write().await;
        let operation = UpdateBookOperation::new(self.record_store.clone());

        match operation.run(UpdateBookOperationRequest { position, draft })? {
            UpdateBookOperationOutcome::Updated(result) => Ok(result),
            UpdateBookOperationOutcome::Invalid(violations) => {
                Err(BookshelfError::Validation(violations))
            }
            UpdateBookOperationOutcome::NotFound => Err(book_not_found(position)),
        }
    }

    pub async fn delete(&self, position: usize) -> Result<DeleteBookOperationResult> {
        let layout = self.layout_lock.clone().write_owned().await;
        let operation =
            DeleteBookOperation::new(self.record_store.clone(), self.content_store.clone());
        let record_store = self.record_store.clone();
        let blob_locks = self.blob_locks.clone();

        let task = tokio::spawn(async move {
            let _layout = layout;
            let outcome = operation.run(DeleteBookOperationRequest { position }).await;

            let len = record_store.load_all().len();
            blob_locks.lock().await.retain(|p, _| *p < len);

            outcome
        });

        match task.await.map_err(task_failed)?? {
            DeleteBookOperationOutcome::Deleted(result) => Ok(result),
            DeleteBookOperationOutcome::NotFound => Err(book_not_found(position)),
        }
    }

    pub async fn read_content(
        &self,
        position: usize,
        mode: ReadMode,
    ) -> Result<ReadContentOperationResult> {
        let _layout = self.layout_lock.read().await;
        let operation =
            ReadContentOperation::new(self.record_store.clone(), self.content_store.clone());

        match operation
            .run(ReadContentOperationRequest { position, mode })
            .await?
        {
            ReadContentOperationOutcome::Found(result) => Ok(result),
            ReadContentOperationOutcome::NotFound => Err(BookshelfError::NotFound(format!(
                "content for book at position {}",
                position
            ))),
        }
    }

    pub async fn write_content(&self, position: usize, content: String) -> Result<()> {
        let _layout = self.layout_lock.read().await;
        let blob_lock = self.blob_lock(position).await;
        let _blob = blob_lock.lock().await;

        let operation =
            WriteContentOperation::new(self.record_store.clone(), self.content_store.clone());

        match operation
            .run(WriteContentOperationRequest { position, content })
            .await?
        {
            WriteContentOperationOutcome::Written => {
                tracing::info!("Updated content for book at position {}", position);
                Ok(())
            }
            WriteContentOperationOutcome::Invalid(violations) => {
                Err(BookshelfError::Validation(violations))
            }
            WriteContentOperationOutcome::NotFound => Err(book_not_found(position)),
        }
    }

    async fn blob_lock(&self, position: usize) -> Arc<Mutex<()>> {
        let mut locks = self.blob_locks.lock().await;
        locks
            .entry(position)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    async fn tracked_blob_locks(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.blob_locks.lock().await.keys().copied().collect();
        positions.sort_unstable();
        positions
    }
}

fn book_not_found(position: usize) -> BookshelfError {
    BookshelfError::NotFound(format!("book at position {}", position))
}

fn task_failed(error: JoinError) -> BookshelfError {
    tracing::error!("Mutation task did not complete: {}", error);
    BookshelfError::InternalInconsistency(format!("mutation task failed: {}", error))
}
