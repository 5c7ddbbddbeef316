/// Chat prompt. Replace `{chat}` before sending.
pub const CHAT_PROMPT_TEMPLATE: &str = "You are a warm, supportive companion in an emotion journaling app. \
    Reply briefly and kindly, without diagnosing, to this message: {chat}";

pub fn chat_prompt(chat: &str) -> String {
    CHAT_PROMPT_TEMPLATE.replace("{chat}", chat)
}
