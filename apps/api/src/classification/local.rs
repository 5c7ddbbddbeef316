use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::info;

use crate::classification::artifact::load_artifact;
use crate::classification::model::{argmax, DenseModel, ModelError};
use crate::classification::tokenizer::Tokenizer;
use crate::classification::{ClassifyError, EmotionClassifier};
use crate::config::LocalModelConfig;

/// Classifies with a locally evaluated tokenizer + dense model pair.
///
/// Both artifacts are loaded on first use and kept for the lifetime of this
/// instance. A failed load is not cached, so the next request retries it.
pub struct LocalModelClassifier {
    config: LocalModelConfig,
    http: Client,
    tokenizer: OnceCell<Arc<Tokenizer>>,
    model: OnceCell<Arc<DenseModel>>,
}

impl LocalModelClassifier {
    pub fn new(config: LocalModelConfig, http: Client) -> Self {
        Self {
            config,
            http,
            tokenizer: OnceCell::new(),
            model: OnceCell::new(),
        }
    }

    async fn tokenizer(&self) -> Result<&Arc<Tokenizer>, ModelError> {
        self.tokenizer
            .get_or_try_init(|| async {
                let raw = load_artifact(&self.http, &self.config.tokenizer_location).await?;
                let tokenizer = Tokenizer::from_json(&raw)?;
                info!("Tokenizer loaded from {}", self.config.tokenizer_location);
                Ok::<_, ModelError>(Arc::new(tokenizer))
            })
            .await
    }

    async fn model(&self) -> Result<&Arc<DenseModel>, ModelError> {
        self.model
            .get_or_try_init(|| async {
                let raw = load_artifact(&self.http, &self.config.model_location).await?;
                let model = DenseModel::from_json(&raw)?;
                model.validate(self.config.max_len, self.config.labels.len())?;
                info!(
                    "Classifier loaded from {} ({} layers)",
                    self.config.model_location,
                    model.layers.len()
                );
                Ok::<_, ModelError>(Arc::new(model))
            })
            .await
    }
}

#[async_trait]
impl EmotionClassifier for LocalModelClassifier {
    async fn classify(&self, text: &str) -> Result<String, ClassifyError> {
        let tokenizer = self.tokenizer().await?;
        let model = self.model().await?;

        let input = tokenizer.encode(text, self.config.max_len);
        let scores = model.predict(&input);
        let index = argmax(&scores).ok_or(ClassifyError::NoLabel)?;

        self.config
            .labels
            .get(index)
            .cloned()
            .ok_or(ClassifyError::Model(ModelError::UnknownClass { index }))
    }
}
