/// Pulls the useful answer out of a generative backend's raw text.
///
/// Backends are prompted to answer concisely; the extractor is where that
/// convention is interpreted, so a backend with structured output can bring
/// its own implementation without touching the pipelines.
pub trait ResponseExtractor: Send + Sync {
    /// Returns `None` when the response carries nothing usable.
    fn extract(&self, raw: &str) -> Option<String>;
}

/// Keeps only the first line of the response.
///
/// Anything after the first line break is discarded, including legitimate
/// content when the backend ignores the "answer only with X" instruction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLineExtractor;

impl ResponseExtractor for FirstLineExtractor {
    fn extract(&self, raw: &str) -> Option<String> {
        let first = raw.split('\n').next().unwrap_or_default().trim();
        if first.is_empty() {
            None
        } else {
            Some(first.to_string())
        }
    }
}
