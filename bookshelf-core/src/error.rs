use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookshelfError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookshelfError {
    /// Granular messages for the response envelope. Only validation failures carry more
    /// than the display string.
    pub fn details(&self) -> Option<Vec<String>> {
        match self {
            Self::Validation(violations) => Some(violations.clone()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, BookshelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_all_violations() {
        let error = BookshelfError::Validation(vec![
            "Title is required".to_string(),
            "Author is required".to_string(),
        ]);

        assert_eq!(
            error.to_string(),
            "Validation failed: Title is required; Author is required"
        );
        assert_eq!(error.details().map(|d| d.len()), Some(2));
    }

    #[test]
    fn test_io_not_found_is_not_a_not_found_error() {
        let error: BookshelfError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!error.is_not_found());
        assert!(error.details().is_none());
    }
}
