use serde::{Deserialize, Serialize};

/// One book entry in the persisted collection.
///
/// Records have no identifier; a record is addressed by its position in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub summary: String,
    #[serde(rename = "publishDate")]
    pub publish_date: String,
}

/// Candidate record as submitted by a client.
///
/// Every field is optional so that a missing field is reported by the validator
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "publishDate")]
    pub publish_date: Option<String>,
}

impl BookDraft {
    pub fn new(title: &str, author: &str, summary: &str, publish_date: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            summary: Some(summary.to_string()),
            publish_date: Some(publish_date.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    pub fn publish_date(&self) -> &str {
        self.publish_date.as_deref().unwrap_or_default()
    }

    /// Converts the draft as submitted. Callers validate first.
    pub fn into_record(self) -> BookRecord {
        BookRecord {
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            publish_date: self.publish_date.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_camel_case_publish_date() {
        let record = BookDraft::new("Dune", "Frank Herbert", "Spice", "1965-08-01").into_record();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["publishDate"], "1965-08-01");
        assert!(json.get("publish_date").is_none());
    }

    #[test]
    fn test_draft_tolerates_missing_fields() {
        let draft: BookDraft = serde_json::from_str(r#"{"title":"Only a title"}"#).unwrap();
        assert_eq!(draft.title(), "Only a title");
        assert_eq!(draft.author(), "");
        assert_eq!(draft.publish_date(), "");
    }
}
