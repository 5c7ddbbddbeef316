//! Asks the generative backend for a coping suggestion and a reference link.
//!
//! The two prompts are independent and issued concurrently. Neither failure
//! fails the request: each answer falls back to its own sentinel text.

use std::sync::Arc;

use tracing::warn;

use crate::llm_client::{GenerativeBackend, LlmError};
use crate::models::ReferenceLink;
use crate::recommendation::prompts::{advice_prompt, link_prompt};
use crate::text::{sanitize, ResponseExtractor};

pub const UNABLE_TO_GENERATE_RECOMMENDATION: &str = "Unable to generate recommendation";
pub const UNABLE_TO_GENERATE_LINK: &str = "Unable to generate link";

/// Title given to the backend-suggested link.
pub const GENERATED_LINK_TITLE: &str = "Suggested reading";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRecommendation {
    pub text: String,
    pub link: ReferenceLink,
}

pub struct RecommendationGenerator {
    backend: Arc<dyn GenerativeBackend>,
    extractor: Arc<dyn ResponseExtractor>,
}

impl RecommendationGenerator {
    pub fn new(backend: Arc<dyn GenerativeBackend>, extractor: Arc<dyn ResponseExtractor>) -> Self {
        Self { backend, extractor }
    }

    /// Never fails; see `UNABLE_TO_GENERATE_RECOMMENDATION` and `UNABLE_TO_GENERATE_LINK`.
    pub async fn generate(&self, label: &str) -> GeneratedRecommendation {
        let (advice, link) = tokio::join!(
            self.ask(advice_prompt(label)),
            self.ask(link_prompt(label))
        );

        GeneratedRecommendation {
            text: or_sentinel(advice, UNABLE_TO_GENERATE_RECOMMENDATION),
            link: ReferenceLink::new(
                GENERATED_LINK_TITLE,
                or_sentinel(link, UNABLE_TO_GENERATE_LINK),
            ),
        }
    }

    async fn ask(&self, prompt: String) -> Result<String, LlmError> {
        let raw = self.backend.generate(&prompt).await?;
        self.extractor
            .extract(&raw)
            .map(|line| sanitize(&line))
            .filter(|line| !line.is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

fn or_sentinel(result: Result<String, LlmError>, sentinel: &str) -> String {
    result.unwrap_or_else(|e| {
        warn!("Generation failed, using sentinel '{sentinel}': {e}");
        sentinel.to_string()
    })
}
