use serde::{Deserialize, Serialize};

use super::kinds::ListItem;

/// A maximal run of input lines classified as one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// One or more consecutive blank lines.
    Blank,
    /// Raw lines of a fenced code block, opening and closing fences included.
    Fence(Vec<String>),
    /// Consecutive list item lines.
    ListRun(Vec<ListItem>),
    /// Consecutive plain lines.
    Paragraph(Vec<String>),
}

/// The output unit of markdown parsing: text content plus optional nested children.
///
/// `children` is `None` rather than an empty list when the block has no nested
/// items, and serializes without a `children` key in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ContentBlock>>,
}

impl ContentBlock {
    pub fn leaf(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: None,
        }
    }

    /// Builds a block whose `children` is absent when `children` is empty.
    pub fn with_children(content: impl Into<String>, children: Vec<ContentBlock>) -> Self {
        Self {
            content: content.into(),
            children: if children.is_empty() {
                None
            } else {
                Some(children)
            },
        }
    }

    pub fn children(&self) -> &[ContentBlock] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of blocks in this subtree, this block included.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(ContentBlock::count).sum::<usize>()
    }
}
