pub mod create_book;
pub mod delete_book;
pub mod list_books;
pub mod read_content;
pub mod update_book;
pub mod write_content;

pub use create_book::{
    CreateBookOperation, CreateBookOperationOutcome, CreateBookOperationRequest,
    CreateBookOperationResult,
};
pub use delete_book::{
    DeleteBookOperation, DeleteBookOperationOutcome, DeleteBookOperationRequest,
    DeleteBookOperationResult,
};
pub use list_books::{ListBooksOperation, ListBooksOperationResult};
pub use read_content::{
    ReadContentOperation, ReadContentOperationOutcome, ReadContentOperationRequest,
    ReadContentOperationResult,
};
pub use update_book::{
    UpdateBookOperation, UpdateBookOperationOutcome, UpdateBookOperationRequest,
    UpdateBookOperationResult,
};
pub use write_content::{
    WriteContentOperation, WriteContentOperationOutcome, WriteContentOperationRequest,
};
