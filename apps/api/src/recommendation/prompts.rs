use crate::llm_client::prompts::SINGLE_LINE_INSTRUCTION;

/// Coping suggestion prompt. Replace `{label}` before sending.
pub const ADVICE_PROMPT_TEMPLATE: &str =
    "I feel {label}, write a suggestion to regulate this emotion in one paragraph. {single_line}";

/// Reference link prompt. Replace `{label}` before sending.
pub const LINK_PROMPT_TEMPLATE: &str = "What I feel now is {label}. Recommend one article about it. \
    Answer only with the URL, nothing else. \
    Do not use YouTube or any other video site. \
    Prefer links from psychologytoday.com. {single_line}";

pub fn advice_prompt(label: &str) -> String {
    ADVICE_PROMPT_TEMPLATE
        .replace("{single_line}", SINGLE_LINE_INSTRUCTION)
        .replace("{label}", label)
}

pub fn link_prompt(label: &str) -> String {
    LINK_PROMPT_TEMPLATE
        .replace("{single_line}", SINGLE_LINE_INSTRUCTION)
        .replace("{label}", label)
}
