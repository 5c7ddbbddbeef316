//! Curated reference links keyed by emotion label.
//!
//! Loaded once at startup and never mutated. Changing a link means shipping new
//! catalog data. Keys are lower-cased on load and lookups are case-insensitive.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::ReferenceLink;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Title of the single entry shown when a label has no curated links.
pub const NO_RECOMMENDATION_TITLE: &str = "No specific recommendation";

#[derive(Debug, Clone, Default)]
pub struct RecommendationCatalog {
    entries: HashMap<String, Vec<ReferenceLink>>,
}

impl RecommendationCatalog {
    /// Parses `{ "<label>": [{"title": .., "link": ..}, ..] }`.
    /// Keys differing only by case are merged, in key order.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: BTreeMap<String, Vec<ReferenceLink>> = serde_json::from_str(raw)?;

        let mut entries: HashMap<String, Vec<ReferenceLink>> = HashMap::new();
        for (label, links) in parsed {
            entries
                .entry(normalize(&label))
                .or_default()
                .extend(links);
        }
        Ok(Self { entries })
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG).context("bundled catalog is malformed")
    }

    /// Loads the catalog from `path`, or the bundled one when no path is configured.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read catalog {}", path.display()))?;
                Self::from_json(&raw)
                    .with_context(|| format!("Catalog {} is malformed", path.display()))?
            }
            None => Self::bundled()?,
        };
        if catalog.is_empty() {
            warn!("Recommendation catalog is empty; every label will get the placeholder link");
        } else {
            info!("Recommendation catalog loaded: {} labels", catalog.len());
        }
        Ok(catalog)
    }

    /// Curated links for `label`, in authored order. Empty when the label is unknown.
    pub fn lookup(&self, label: &str) -> &[ReferenceLink] {
        self.entries
            .get(&normalize(label))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Placeholder rendered in place of an empty lookup.
pub fn placeholder_link() -> ReferenceLink {
    ReferenceLink::new(NO_RECOMMENDATION_TITLE, "")
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
