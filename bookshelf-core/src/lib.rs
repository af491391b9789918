//! Bookshelf Core - persistence for book records and their text content
//!
//! - Book metadata lives in a single JSON array file
//! - Each book owns a text blob named after its 1-based position (`content_{n}`)
//! - Deleting a book renumbers the blobs of the books after it
//! - Mutations are serialized inside [`RecordService`]

pub mod error;
pub mod model;
pub mod operations;
pub mod service;
pub mod storage;
pub mod validator;

pub use error::{BookshelfError, Result};
pub use model::{BookDraft, BookRecord};
pub use service::RecordService;
pub use storage::{ContentStore, ReadMode, RecordStore, blob_name, placeholder_text};
pub use validator::validate;
