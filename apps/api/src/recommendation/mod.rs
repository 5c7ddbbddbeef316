// Recommendations: coping advice for a label, merged with curated catalog links.

pub mod catalog;
pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;

pub use catalog::RecommendationCatalog;
pub use generator::RecommendationGenerator;
