use crate::llm_client::prompts::SINGLE_LINE_INSTRUCTION;

/// Classification prompt. Replace `{text}` and `{single_line}` before sending.
pub const CLASSIFY_PROMPT_TEMPLATE: &str =
    "I feel {text}, classify the emotion. Answer only with the emotion, in one word. {single_line}";

pub fn classify_prompt(text: &str) -> String {
    CLASSIFY_PROMPT_TEMPLATE
        .replace("{single_line}", SINGLE_LINE_INSTRUCTION)
        .replace("{text}", text)
}
