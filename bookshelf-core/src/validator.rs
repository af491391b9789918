use crate::model::BookDraft;
use regex::Regex;
use std::sync::LazyLock;

static PUBLISH_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("publish date pattern is valid")
});

pub const TITLE_REQUIRED: &str = "Title is required";
pub const AUTHOR_REQUIRED: &str = "Author is required";
pub const SUMMARY_REQUIRED: &str = "Summary is required";
pub const PUBLISH_DATE_FORMAT: &str = "Publish date must be in YYYY-MM-DD format";

/// Check a candidate record and return every violation, in field order.
///
/// An empty list means the draft is valid. The date check is format only, so
/// `2024-13-99` passes.
pub fn validate(draft: &BookDraft) -> Vec<String> {
    let mut violations = Vec::new();

    if draft.title().trim().is_empty() {
        violations.push(TITLE_REQUIRED.to_string());
    }
    if draft.author().trim().is_empty() {
        violations.push(AUTHOR_REQUIRED.to_string());
    }
    if draft.summary().trim().is_empty() {
        violations.push(SUMMARY_REQUIRED.to_string());
    }
    if !PUBLISH_DATE_PATTERN.is_match(draft.publish_date()) {
        violations.push(PUBLISH_DATE_FORMAT.to_string());
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let draft = BookDraft::new("A", "B", "C", "2024-01-01");
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_reports_every_violation_in_order() {
        let draft = BookDraft::new("  ", "", "\t", "01/01/2024");
        assert_eq!(
            validate(&draft),
            vec![
                TITLE_REQUIRED,
                AUTHOR_REQUIRED,
                SUMMARY_REQUIRED,
                PUBLISH_DATE_FORMAT
            ]
        );
    }

    #[test]
    fn test_missing_fields_are_violations() {
        let violations = validate(&BookDraft::default());
        assert_eq!(violations.len(), 4);
        assert_eq!(violations[0], TITLE_REQUIRED);
    }

    #[test]
    fn test_single_violation() {
        let draft = BookDraft::new("A", "", "C", "2024-01-01");
        assert_eq!(validate(&draft), vec![AUTHOR_REQUIRED]);
    }

    #[test]
    fn test_date_is_format_only() {
        let draft = BookDraft::new("A", "B", "C", "2024-13-99");
        assert!(validate(&draft).is_empty());

        for bad in ["2024-1-01", "24-01-01", "2024-01-01T00:00", " 2024-01-01", ""] {
            let draft = BookDraft::new("A", "B", "C", bad);
            assert_eq!(validate(&draft), vec![PUBLISH_DATE_FORMAT], "date {:?}", bad);
        }
    }
}
