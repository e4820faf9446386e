use super::kinds::{CodeFence, ListItem};

/// Classification of a single line containing only local facts.
///
/// Each line is classified independently without reference to surrounding
/// context; the segmenter decides what the facts mean at its cursor.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// The raw line, without its `'\n'` terminator.
    pub text: &'a str,
    /// Whether the line is empty after trimming whitespace.
    pub is_blank: bool,
    /// Whether the line opens (or closes) a backtick fence.
    pub is_fence: bool,
    /// The parsed list item if the line matches the list item pattern.
    pub list_item: Option<ListItem>,
}

/// Classifies individual lines for segmentation.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        LineClass {
            text: line,
            is_blank: line.trim().is_empty(),
            is_fence: CodeFence::is_fence(line),
            list_item: ListItem::parse(line),
        }
    }
}
