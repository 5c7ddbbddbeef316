//! Emotion classification: turns free text into a single emotion label.
//!
//! Two interchangeable strategies implement `EmotionClassifier`:
//! - `RemoteClassifier` prompts the generative backend and reads its first line.
//! - `LocalModelClassifier` tokenizes the text and runs a dense classifier,
//!   loading both artifacts lazily once per instance.
//!
//! `AppState` holds an `Arc<dyn EmotionClassifier>` chosen at startup via
//! `CLASSIFIER_BACKEND`. Strategies report failures as `ClassifyError`; the
//! prediction pipeline collapses them into sentinel text with `label_or_sentinel`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::LlmError;

pub mod artifact;
pub mod local;
pub mod model;
pub mod prompts;
pub mod remote;
pub mod tokenizer;

pub use local::LocalModelClassifier;
pub use remote::RemoteClassifier;

/// Label stored when no backend could produce one.
pub const UNABLE_TO_CLASSIFY: &str = "Unable to generate emotion";

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Backend(#[from] LlmError),

    #[error("local model error: {0}")]
    Model(#[from] model::ModelError),

    #[error("backend produced no usable label")]
    NoLabel,
}

#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<String, ClassifyError>;
}

/// Explicit fallback for the lenient classification policy: any failure
/// becomes `UNABLE_TO_CLASSIFY` so the request still yields a storable record.
pub fn label_or_sentinel(result: Result<String, ClassifyError>) -> String {
    match result {
        Ok(label) => label,
        Err(e) => {
            warn!("Classification failed, storing sentinel label: {e}");
            UNABLE_TO_CLASSIFY.to_string()
        }
    }
}
