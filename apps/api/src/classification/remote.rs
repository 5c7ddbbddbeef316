use std::sync::Arc;

use async_trait::async_trait;

use crate::classification::prompts::classify_prompt;
use crate::classification::{ClassifyError, EmotionClassifier};
use crate::llm_client::GenerativeBackend;
use crate::text::ResponseExtractor;

/// Classifies by asking the generative backend to name the emotion.
pub struct RemoteClassifier {
    backend: Arc<dyn GenerativeBackend>,
    extractor: Arc<dyn ResponseExtractor>,
}

impl RemoteClassifier {
    pub fn new(backend: Arc<dyn GenerativeBackend>, extractor: Arc<dyn ResponseExtractor>) -> Self {
        Self { backend, extractor }
    }
}

#[async_trait]
impl EmotionClassifier for RemoteClassifier {
    async fn classify(&self, text: &str) -> Result<String, ClassifyError> {
        let raw = self.backend.generate(&classify_prompt(text)).await?;
        self.extractor.extract(&raw).ok_or(ClassifyError::NoLabel)
    }
}
