//! Storage modules for Bookshelf
//!
//! A JSON collection file for book metadata and one text file per book for content.

pub mod content_store;
pub mod record_store;

pub use content_store::{ContentStore, ReadMode, blob_name, placeholder_text};
pub use record_store::RecordStore;
