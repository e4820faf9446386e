/// Fenced code block delimiter detection.
///
/// Only backtick fences are recognized. Any line whose content, after
/// leading whitespace is stripped, starts with three backticks both opens
/// and closes a fence; info strings after the opener are not inspected.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    pub fn is_fence(line: &str) -> bool {
        line.trim_start().starts_with(Self::BACKTICKS)
    }
}
