// Post-processing for free text coming back from generative backends.

pub mod extractor;
pub mod sanitizer;

pub use extractor::{FirstLineExtractor, ResponseExtractor};
pub use sanitizer::sanitize;
