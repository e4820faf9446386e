use std::sync::OnceLock;

use regex::Regex;

use crate::outline::OutlineContext;

/// Longest notification extract, in characters.
pub const EXTRACT_LEN: usize = 128;

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

/// `"<block content>:\n\n<container content>"`
pub fn build_prompt(context: &OutlineContext) -> String {
    format!(
        "{}:\n\n{}",
        context.block_content, context.container_content
    )
}

/// The focus block's content on one line, truncated for display.
pub fn notification_extract(block_content: &str) -> String {
    whitespace_regex()
        .replace_all(block_content, " ")
        .chars()
        .take(EXTRACT_LEN)
        .collect()
}

pub fn notification_message(block_content: &str) -> String {
    format!("SecureChat: {}...", notification_extract(block_content))
}
