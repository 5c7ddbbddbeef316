pub mod prediction;
pub mod recommendation;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A `{title, url}` pair, either curated in the catalog or produced by the generator.
/// Catalog data and legacy clients call the URL field `link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLink {
    pub title: String,
    #[serde(alias = "link")]
    pub url: String,
}

impl ReferenceLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Optional filters accepted by the list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    /// Case-insensitive exact match on the stored label.
    pub emotion: Option<String>,
    pub user_id: Option<Uuid>,
}

impl RecordFilter {
    /// The label filter, trimmed; blank values mean "no filter".
    pub fn emotion(&self) -> Option<&str> {
        self.emotion
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    #[cfg(test)]
    pub fn matches(&self, label: &str, user_id: Option<Uuid>) -> bool {
        let label_ok = self
            .emotion()
            .map_or(true, |e| e.to_lowercase() == label.trim().to_lowercase());
        let user_ok = self.user_id.map_or(true, |u| user_id == Some(u));
        label_ok && user_ok
    }
}
