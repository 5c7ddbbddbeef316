// Predictions: classify free text and journal the label.

pub mod handlers;
pub mod pipeline;
