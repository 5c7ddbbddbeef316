// Shared prompt fragments.
// Each pipeline that calls the backend defines its own prompts.rs alongside it.

/// Appended to prompts whose answer is read with `FirstLineExtractor`.
pub const SINGLE_LINE_INSTRUCTION: &str =
    "Answer on a single line, without markdown and without any explanation.";
